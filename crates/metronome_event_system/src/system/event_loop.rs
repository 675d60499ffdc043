/// Frame-paced main loop
use super::core::EventSystem;
use crate::clock::diff_millis;
use crate::event::{Event, EventKind};
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

/// Lifecycle of [`EventSystem::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopState {
    /// `run` has not been entered yet.
    NotStarted,
    /// Frames are being produced.
    Running,
    /// A break was processed; the current frame finishes and the loop returns.
    Stopping,
    /// `run` has returned.
    Stopped,
}

impl EventSystem {
    /// Runs the main loop until a loop break is processed.
    ///
    /// A [`EventKind::Start`] event is queued first. Each frame then:
    ///
    /// 1. reads the clock and queues an [`EventKind::Update`] event carrying
    ///    the time since the previous frame started,
    /// 2. drains the queue completely,
    /// 3. sleeps for whatever is left of the frame budget, if anything.
    ///
    /// The loop returns after the frame in which [`EventSystem::exit`] took
    /// effect; that frame's drain delivers exactly one [`EventKind::Exit`].
    /// Pacing is computed per frame with no drift correction.
    ///
    /// # Panics
    ///
    /// Panics if called while the loop is already running (from a callback).
    pub fn run(&self) {
        assert!(
            !matches!(self.state.get(), LoopState::Running | LoopState::Stopping),
            "EventSystem::run called while the loop is already running"
        );

        let budget = self.config.frame_budget();
        self.emit(Event::new(EventKind::Start));
        self.state.set(LoopState::Running);
        info!(
            "▶️ Event loop started at {} fps ({:.2}ms per frame, {} handlers)",
            self.config.target_fps,
            budget.as_secs_f64() * 1000.0,
            self.handler_count()
        );

        let mut last_tick = self.clock.now();
        while self.state.get() == LoopState::Running {
            let frame_start = self.clock.now();
            self.emit(Event::update(frame_start, last_tick));

            self.drain();

            let frame_end = self.clock.now();
            let processing = frame_end.saturating_sub(frame_start);
            self.stats.borrow_mut().frames += 1;
            if processing < budget {
                let remainder = budget - processing;
                trace!("💤 Frame done in {:?}, sleeping {:?}", processing, remainder);
                self.stats.borrow_mut().total_sleep_ms += remainder.as_secs_f64() * 1000.0;
                self.clock.sleep(remainder);
            } else {
                self.stats.borrow_mut().overrun_frames += 1;
                if self.config.overrun_warning && processing > budget * 2 {
                    warn!(
                        "🐢 Frame took {:.2}ms, budget is {:.2}ms",
                        diff_millis(frame_end, frame_start),
                        budget.as_secs_f64() * 1000.0
                    );
                }
            }
            last_tick = frame_start;
        }

        self.state.set(LoopState::Stopped);
        info!("⏹️ Event loop stopped after {} frames", self.stats.borrow().frames);
    }
}
