/// Queue draining, control-command handling and broadcast
use super::core::{EventSystem, QueuedEvent, SystemCommand};
use super::event_loop::LoopState;
use crate::event::{Event, EventKind};
use tracing::{debug, trace};

/// What the drain pass should do after one queue entry was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchAction {
    Continue,
    /// A loop break was requested.
    Exit,
}

impl EventSystem {
    /// Processes every queued entry until the queue is empty.
    ///
    /// Events are broadcast in FIFO order; control commands are applied
    /// between broadcasts. When a loop break is seen, a single
    /// [`EventKind::Exit`] event is queued and delivered in this same pass,
    /// and a running loop moves to [`LoopState::Stopping`].
    ///
    /// Returns true if a loop break was processed.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a handler callback.
    pub fn drain(&self) -> bool {
        assert!(
            !self.draining.replace(true),
            "EventSystem::drain called re-entrantly from a handler callback"
        );

        let mut break_requested = false;
        while let Some(queued) = self.next_event() {
            if self.dispatch(queued) == DispatchAction::Exit && !break_requested {
                break_requested = true;
                if self.state.get() == LoopState::Running {
                    self.state.set(LoopState::Stopping);
                }
                self.emit(Event::new(EventKind::Exit));
            }
        }

        self.draining.set(false);
        break_requested
    }

    /// Processes one queue entry and destroys it.
    ///
    /// This is the single step of [`EventSystem::drain`]. Pair it with
    /// [`EventSystem::next_event`] to step the queue by hand. Unlike `drain`,
    /// a break command only yields [`DispatchAction::Exit`]; no `Exit` event
    /// is queued.
    pub fn dispatch(&self, queued: QueuedEvent) -> DispatchAction {
        match queued {
            QueuedEvent::Command(command) => self.apply_command(command),
            QueuedEvent::Event(event) => {
                self.broadcast(&event);
                DispatchAction::Continue
            }
        }
    }

    fn apply_command(&self, command: SystemCommand) -> DispatchAction {
        self.stats.borrow_mut().commands_processed += 1;
        match command {
            SystemCommand::BreakLoop => {
                debug!("⏹️ Loop break requested");
                DispatchAction::Exit
            }
            SystemCommand::RemoveHandler(target) => {
                let removed = {
                    let mut handlers = self.handlers.borrow_mut();
                    handlers
                        .iter()
                        .position(|h| target.points_to(h))
                        .map(|index| handlers.remove(index))
                };

                match removed {
                    Some(handler) => {
                        debug!("🗑️ Removed handler '{}'", handler.name());
                        self.stats.borrow_mut().handlers_removed += 1;
                        // The system's reference is released here, outside the borrow.
                        drop(handler);
                    }
                    None => debug!("Removal requested for a handler that is not registered: {:?}", target),
                }
                DispatchAction::Continue
            }
        }
    }

    fn broadcast(&self, event: &Event) {
        trace!("📤 Dispatching {} to {} handlers", event.kind(), self.handler_count());

        let mut invoked = 0u64;
        for handler in self.handlers() {
            handler.invoke(event, self);
            invoked += 1;
        }

        let mut stats = self.stats.borrow_mut();
        stats.events_dispatched += 1;
        stats.handler_invocations += invoked;
    }
}
