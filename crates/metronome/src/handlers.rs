//! Built-in handlers registered by the application.
//!
//! Each constructor returns an [`EventHandler`] whose per-handler state lives
//! in the handler's own payload and is read back through
//! [`EventHandler::data`].

use metronome_event_system::{Event, EventHandler, EventKind, ShutdownState};
use std::cell::Cell;
use tracing::{debug, info};

/// Custom event kind code for heartbeats.
pub const HEARTBEAT: u32 = 1;

/// Payload of a heartbeat event.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatPayload {
    /// 1-based heartbeat number
    pub sequence: u64,
    /// Frame on which the heartbeat was emitted
    pub frame: u64,
}

#[derive(Debug, Default)]
struct ReporterState {
    frames: Cell<u64>,
    total_ms: Cell<f64>,
    window_ms: Cell<f64>,
}

/// Logs average frame time every `every` frames and a summary on exit.
pub fn frame_reporter(every: u64) -> EventHandler {
    EventHandler::with_data("frame-reporter", ReporterState::default(), move |me, event, _| {
        let Some(state) = me.data::<ReporterState>() else {
            return;
        };
        match event.kind() {
            EventKind::Start => info!("🚦 Event loop is starting"),
            EventKind::Update => {
                let elapsed = event.elapsed_ms().unwrap_or(0.0);
                let frames = state.frames.get() + 1;
                state.frames.set(frames);
                state.total_ms.set(state.total_ms.get() + elapsed);
                state.window_ms.set(state.window_ms.get() + elapsed);

                if every > 0 && frames % every == 0 {
                    info!(
                        "📊 Frame {} - avg {:.2}ms over the last {} frames",
                        frames,
                        state.window_ms.get() / every as f64,
                        every
                    );
                    state.window_ms.set(0.0);
                }
            }
            EventKind::Exit => {
                let frames = state.frames.get();
                let avg = if frames > 1 {
                    // The first update has no previous frame to measure from.
                    state.total_ms.get() / (frames - 1) as f64
                } else {
                    0.0
                };
                info!("🏁 Ran {} frames, avg frame time {:.2}ms", frames, avg);
            }
            EventKind::Custom(_) => {}
        }
    })
}

/// Requests exit after `max_frames` updates.
pub fn frame_limiter(max_frames: u64) -> EventHandler {
    EventHandler::with_data("frame-limiter", Cell::new(0u64), move |me, event, system| {
        if event.kind() != EventKind::Update {
            return;
        }
        let Some(frames) = me.data::<Cell<u64>>() else {
            return;
        };
        frames.set(frames.get() + 1);
        if frames.get() == max_frames {
            info!("⏱️ Reached frame limit of {}, requesting exit", max_frames);
            system.exit();
        }
    })
}

/// Emits a [`HEARTBEAT`] event every `every_frames` updates.
pub fn heartbeat(every_frames: u64) -> EventHandler {
    EventHandler::with_data("heartbeat", Cell::new((0u64, 0u64)), move |me, event, system| {
        if event.kind() != EventKind::Update || every_frames == 0 {
            return;
        }
        let Some(counters) = me.data::<Cell<(u64, u64)>>() else {
            return;
        };
        let (frame, sequence) = counters.get();
        let frame = frame + 1;
        if frame % every_frames == 0 {
            let payload = HeartbeatPayload {
                sequence: sequence + 1,
                frame,
            };
            system.emit(
                Event::with_destructor(EventKind::Custom(HEARTBEAT), payload, |beat| {
                    debug!("💓 Heartbeat #{} released", beat.sequence);
                })
                .from_sender(me),
            );
            counters.set((frame, sequence + 1));
        } else {
            counters.set((frame, sequence));
        }
    })
}

/// Counts heartbeats and unregisters itself after `limit` of them.
pub fn heartbeat_listener(limit: u64) -> EventHandler {
    EventHandler::with_data("heartbeat-listener", Cell::new(0u64), move |me, event, system| {
        if event.kind() != EventKind::Custom(HEARTBEAT) {
            return;
        }
        let (Some(seen), Some(beat)) = (me.data::<Cell<u64>>(), event.data::<HeartbeatPayload>())
        else {
            return;
        };
        seen.set(seen.get() + 1);
        let sender = event.sender().map(|s| s.name().to_string()).unwrap_or_default();
        info!("💓 Heartbeat #{} from '{}' at frame {}", beat.sequence, sender, beat.frame);

        if seen.get() == limit {
            info!("👋 Heard {} heartbeats, unregistering", limit);
            system.remove_handler(me);
        }
    })
}

/// Requests exit once `shutdown_state` has been flipped by a signal.
pub fn shutdown_watcher(shutdown_state: ShutdownState) -> EventHandler {
    EventHandler::with_data("shutdown-watcher", Cell::new(false), move |me, event, system| {
        if event.kind() != EventKind::Update || !shutdown_state.is_shutdown_initiated() {
            return;
        }
        if let Some(requested) = me.data::<Cell<bool>>() {
            if !requested.replace(true) {
                system.exit();
            }
        }
    })
}
