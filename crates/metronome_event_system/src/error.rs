//! Error types for the event system.

use crate::event::EventKind;

/// Errors surfaced when reading event payloads.
///
/// Everything else in the core is either infallible or a contract violation
/// (which panics).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The event carries no payload
    #[error("event {kind} has no payload")]
    PayloadMissing { kind: EventKind },

    /// The payload is not of the requested type
    #[error("event {kind} payload is {actual}, expected {expected}")]
    PayloadTypeMismatch {
        kind: EventKind,
        expected: &'static str,
        actual: &'static str,
    },
}
