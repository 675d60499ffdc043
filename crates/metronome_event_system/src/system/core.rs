/// Core EventSystem state and queue operations
use super::event_loop::LoopState;
use super::iter::HandlerIter;
use super::stats::EventSystemStats;
use crate::clock::{Clock, SystemClock};
use crate::config::EventLoopConfig;
use crate::event::Event;
use crate::handler::{EventHandler, WeakHandler};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Internal control messages. They travel through the same queue as events
/// but are consumed by the system and never reach a handler.
#[derive(Debug)]
pub enum SystemCommand {
    /// Drop the referenced handler from the sequence and release the
    /// system's reference to it.
    RemoveHandler(WeakHandler),
    /// Stop the loop after the current drain pass.
    BreakLoop,
}

/// One entry of the pending queue.
#[derive(Debug)]
pub enum QueuedEvent {
    Event(Event),
    Command(SystemCommand),
}

/// Owns the handler sequence and the pending-event queue, and runs the
/// frame-paced dispatch loop.
///
/// Every method takes `&self`, so handler callbacks (which receive
/// `&EventSystem`) may emit events, add handlers, request removals and ask
/// the loop to exit while a broadcast is in progress. No internal borrow is
/// ever held across a callback.
///
/// The system is single-threaded (`!Send`). Independent instances may coexist.
pub struct EventSystem {
    /// Registered handlers; insertion order is dispatch order
    pub(super) handlers: RefCell<Vec<EventHandler>>,
    /// Pending events and control commands, FIFO
    pub(super) events: RefCell<VecDeque<QueuedEvent>>,
    /// Time source and sleep primitive for frame pacing
    pub(super) clock: Box<dyn Clock>,
    pub(super) config: EventLoopConfig,
    pub(super) state: Cell<LoopState>,
    /// Set while a drain pass is running, to catch re-entrant draining
    pub(super) draining: Cell<bool>,
    pub(super) stats: RefCell<EventSystemStats>,
}

impl fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSystem")
            .field("handlers", &self.handler_count())
            .field("pending_events", &self.pending_events())
            .field("state", &self.state.get())
            .field("config", &self.config)
            .finish()
    }
}

impl EventSystem {
    /// Creates an empty system paced by the wall clock at the default rate.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock::new()))
    }

    /// Creates an empty system paced by `clock` at the default rate.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self::with_config(EventLoopConfig::default(), clock)
    }

    /// Creates an empty system with explicit loop settings.
    ///
    /// # Panics
    ///
    /// Panics if `config.target_fps` is zero.
    pub fn with_config(config: EventLoopConfig, clock: Box<dyn Clock>) -> Self {
        assert!(config.target_fps > 0, "target_fps must be greater than 0");
        Self {
            handlers: RefCell::new(Vec::new()),
            events: RefCell::new(VecDeque::new()),
            clock,
            config,
            state: Cell::new(LoopState::NotStarted),
            draining: Cell::new(false),
            stats: RefCell::new(EventSystemStats::default()),
        }
    }

    /// Appends `handler` to the dispatch order.
    ///
    /// The handle is moved into the system; the caller's reference becomes
    /// the system's reference. Safe to call from inside a callback.
    pub fn add_handler(&self, handler: EventHandler) {
        debug!("📝 Registered handler '{}'", handler.name());
        self.handlers.borrow_mut().push(handler);
        self.stats.borrow_mut().handlers_registered += 1;
    }

    /// Requests removal of `handler`.
    ///
    /// Nothing changes immediately: a removal command is queued behind every
    /// event already pending, and the handler is dropped from the sequence
    /// when that command is processed. Requesting removal of a handler that
    /// is not (or no longer) registered is harmless.
    pub fn remove_handler(&self, handler: &EventHandler) {
        self.push(QueuedEvent::Command(SystemCommand::RemoveHandler(
            handler.downgrade(),
        )));
    }

    /// Queues `event` at the tail of the pending queue.
    pub fn emit(&self, event: Event) {
        self.push(QueuedEvent::Event(event));
        self.stats.borrow_mut().events_emitted += 1;
    }

    /// Alias of [`EventSystem::emit`].
    pub fn raise_event(&self, event: Event) {
        self.emit(event);
    }

    /// Asks the running loop to stop. Takes effect when the drain pass
    /// reaches the request.
    pub fn exit(&self) {
        self.push(QueuedEvent::Command(SystemCommand::BreakLoop));
    }

    /// Pops the head of the pending queue.
    pub fn next_event(&self) -> Option<QueuedEvent> {
        self.events.borrow_mut().pop_front()
    }

    fn push(&self, queued: QueuedEvent) {
        self.events.borrow_mut().push_back(queued);
    }

    /// Cursor over the live handler sequence.
    pub fn handlers(&self) -> HandlerIter<'_> {
        HandlerIter::new(&self.handlers)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// True if `handler` is currently in the sequence.
    pub fn contains_handler(&self, handler: &EventHandler) -> bool {
        self.handlers.borrow().iter().any(|h| h.ptr_eq(handler))
    }

    /// Number of queued events and commands.
    pub fn pending_events(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn config(&self) -> &EventLoopConfig {
        &self.config
    }

    pub fn stats(&self) -> EventSystemStats {
        self.stats.borrow().clone()
    }

    /// Tears the system down.
    ///
    /// Every pending event is destroyed without being dispatched, then the
    /// system's reference to every remaining handler is released. Handlers
    /// that are still referenced elsewhere stay alive. Dropping the system
    /// does the same thing.
    pub fn cleanup(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        let pending = self.events.get_mut().len();
        // Events go first, oldest first; handlers after.
        let events = std::mem::take(self.events.get_mut());
        drop(events);

        let handlers = std::mem::take(self.handlers.get_mut());
        let remaining = handlers.len();
        drop(handlers);

        if pending > 0 || remaining > 0 {
            debug!(
                "🧹 Event system cleaned up: {} pending events destroyed, {} handlers released",
                pending, remaining
            );
        }
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventSystem {
    fn drop(&mut self) {
        self.teardown();
    }
}
