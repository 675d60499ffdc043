//! # Metronome Event System
//!
//! A single-threaded event core for games, simulations and other interactive
//! programs that want a cooperative "tick, then dispatch" model instead of OS
//! threads.
//!
//! Application code registers [`EventHandler`]s with an [`EventSystem`] and
//! emits [`Event`]s into it. The system queues events and, once per frame,
//! drains the queue, broadcasting each event to every handler in registration
//! order. [`EventSystem::run`] drives the frames at a fixed rate.
//!
//! ## Lifecycle events
//!
//! - [`EventKind::Start`]: queued once when the loop is entered
//! - [`EventKind::Update`]: queued at the start of every frame, with the time
//!   since the previous frame as a [`FrameTime`] payload
//! - [`EventKind::Exit`]: delivered once, in the drain pass that processed
//!   [`EventSystem::exit`]
//!
//! ## Mutating the system from a handler
//!
//! Callbacks get `&EventSystem` and may call any method on it. Structural
//! changes that would disturb an in-flight broadcast are deferred:
//! [`EventSystem::remove_handler`] and [`EventSystem::exit`] queue a control
//! command that is applied between two events, never during one.
//!
//! ## Example
//!
//! ```rust
//! use metronome_event_system::{Event, EventHandler, EventKind, EventSystem, ManualClock};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! const SCORE: u32 = 1;
//!
//! let system = EventSystem::with_clock(Box::new(ManualClock::new()));
//! let total = Rc::new(Cell::new(0));
//!
//! let sink = total.clone();
//! system.add_handler(EventHandler::new("scorer", move |_, event, system| {
//!     match event.kind() {
//!         EventKind::Start => system.emit(Event::with_data(EventKind::Custom(SCORE), 10u32)),
//!         EventKind::Custom(SCORE) => {
//!             sink.set(sink.get() + event.data::<u32>().copied().unwrap_or(0));
//!             system.exit();
//!         }
//!         _ => {}
//!     }
//! }));
//!
//! system.run();
//! assert_eq!(total.get(), 10);
//! system.cleanup();
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod payload;
pub mod shutdown;
pub mod system;

pub use clock::{diff_millis, Clock, ManualClock, SystemClock};
pub use config::{EventLoopConfig, DEFAULT_TARGET_FPS};
pub use error::EventError;
pub use event::{Event, EventKind, FrameTime, USER_EVENT_BASE};
pub use handler::{EventHandler, HandlerFn, WeakHandler};
pub use payload::Payload;
pub use shutdown::ShutdownState;
pub use system::{
    DispatchAction, EventSystem, EventSystemStats, HandlerIter, LoopState, QueuedEvent,
    SystemCommand,
};

/// Version of this crate, for diagnostics.
pub const EVENT_SYSTEM_VERSION: &str = env!("CARGO_PKG_VERSION");
