/// Event system module - broken down into manageable components
mod core;
mod dispatch;
mod event_loop;
mod iter;
mod stats;

pub use core::{EventSystem, QueuedEvent, SystemCommand};
pub use dispatch::DispatchAction;
pub use event_loop::LoopState;
pub use iter::HandlerIter;
pub use stats::EventSystemStats;
