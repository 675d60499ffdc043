//! # Events and Built-in Event Kinds
//!
//! An [`Event`] is an owned message: a kind tag, an optional non-owning
//! reference to the handler that sent it, and an optional owned [`Payload`].
//! Events are created by producers, owned by the queue while pending, and
//! destroyed exactly once right after they are dispatched (or when the system
//! is cleaned up with the event still pending).
//!
//! ## Kinds
//!
//! Three lifecycle kinds are raised by the loop itself:
//!
//! - [`EventKind::Start`] once, before the first frame
//! - [`EventKind::Update`] once per frame, carrying a [`FrameTime`]
//! - [`EventKind::Exit`] once, in the final drain pass
//!
//! Application events use [`EventKind::Custom`]. The internal control messages
//! (handler removal, loop break) are not event kinds at all and cannot be
//! constructed by application code.

use crate::clock::diff_millis;
use crate::error::EventError;
use crate::handler::{EventHandler, WeakHandler};
use crate::payload::Payload;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// First numeric code available to [`EventKind::Custom`] kinds.
///
/// Codes below this value are reserved for the built-in kinds.
pub const USER_EVENT_BASE: u32 = 1000;

/// Identifies what an event means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Raised once before the first frame of [`EventSystem::run`](crate::EventSystem::run).
    Start,
    /// Raised every frame; the payload is a [`FrameTime`].
    Update,
    /// Raised once when the loop stops.
    Exit,
    /// Application-defined kind.
    Custom(u32),
}

impl EventKind {
    /// Stable numeric tag for this kind.
    ///
    /// Built-in kinds map to `0..=2`; custom kinds map to
    /// `USER_EVENT_BASE + n`. The code is widened to `u64` so every
    /// `Custom(n)` gets its own tag.
    pub fn code(self) -> u64 {
        match self {
            EventKind::Start => 0,
            EventKind::Update => 1,
            EventKind::Exit => 2,
            EventKind::Custom(n) => u64::from(USER_EVENT_BASE) + u64::from(n),
        }
    }

    /// Inverse of [`EventKind::code`]. Returns `None` for reserved codes
    /// that have no public kind and for codes past the custom range.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(EventKind::Start),
            1 => Some(EventKind::Update),
            2 => Some(EventKind::Exit),
            c => c
                .checked_sub(u64::from(USER_EVENT_BASE))
                .and_then(|n| u32::try_from(n).ok())
                .map(EventKind::Custom),
        }
    }

    /// True for `Start`, `Update` and `Exit`.
    pub fn is_lifecycle(self) -> bool {
        !matches!(self, EventKind::Custom(_))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Start => write!(f, "start"),
            EventKind::Update => write!(f, "update"),
            EventKind::Exit => write!(f, "exit"),
            EventKind::Custom(n) => write!(f, "custom:{n}"),
        }
    }
}

/// Payload of every [`EventKind::Update`] event: time since the previous frame
/// started, passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Milliseconds between the start of the previous frame and this one.
    pub elapsed_ms: f64,
}

impl FrameTime {
    /// Time from the previous frame start to this one, clamped at zero.
    pub fn between(frame_start: Duration, previous: Duration) -> Self {
        Self {
            elapsed_ms: diff_millis(frame_start, previous),
        }
    }
}

/// An owned, typed message.
pub struct Event {
    sender: Option<WeakHandler>,
    kind: EventKind,
    payload: Option<Payload>,
}

impl Event {
    /// Builds an event from its raw parts. No validation is performed.
    pub fn create(sender: Option<&EventHandler>, kind: EventKind, payload: Option<Payload>) -> Self {
        Self {
            sender: sender.map(EventHandler::downgrade),
            kind,
            payload,
        }
    }

    /// An event with no sender and no payload.
    pub fn new(kind: EventKind) -> Self {
        Self::create(None, kind, None)
    }

    /// Shorthand for `Event::new(EventKind::Custom(code))`.
    pub fn custom(code: u32) -> Self {
        Self::new(EventKind::Custom(code))
    }

    /// An event owning `value`, dropped normally with the event.
    pub fn with_data<T: 'static>(kind: EventKind, value: T) -> Self {
        Self::create(None, kind, Some(Payload::new(value)))
    }

    /// An event owning `value`, passed to `destructor` when the event is destroyed.
    pub fn with_destructor<T, F>(kind: EventKind, value: T, destructor: F) -> Self
    where
        T: 'static,
        F: FnOnce(T) + 'static,
    {
        Self::create(None, kind, Some(Payload::with_destructor(value, destructor)))
    }

    /// The per-frame update event.
    pub(crate) fn update(frame_start: Duration, previous: Duration) -> Self {
        Self::with_data(EventKind::Update, FrameTime::between(frame_start, previous))
    }

    /// Records `sender` as the originating handler.
    pub fn from_sender(mut self, sender: &EventHandler) -> Self {
        self.sender = Some(sender.downgrade());
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The sending handler, if one was recorded and it is still alive.
    pub fn sender(&self) -> Option<EventHandler> {
        self.sender.as_ref().and_then(WeakHandler::upgrade)
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Borrows the payload value if it is a `T`.
    pub fn data<T: 'static>(&self) -> Option<&T> {
        self.payload.as_ref()?.get::<T>()
    }

    /// Like [`Event::data`] but reports why the value is unavailable.
    pub fn try_data<T: 'static>(&self) -> Result<&T, EventError> {
        let payload = self
            .payload
            .as_ref()
            .ok_or(EventError::PayloadMissing { kind: self.kind })?;
        payload.get::<T>().ok_or_else(|| EventError::PayloadTypeMismatch {
            kind: self.kind,
            expected: std::any::type_name::<T>(),
            actual: payload.type_name(),
        })
    }

    /// Elapsed milliseconds for `Update` events.
    pub fn elapsed_ms(&self) -> Option<f64> {
        match self.kind {
            EventKind::Update => self.data::<FrameTime>().map(|t| t.elapsed_ms),
            _ => None,
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("sender", &self.sender().map(|h| h.name().to_string()))
            .field("payload", &self.payload)
            .finish()
    }
}
