//! Reference-counted event handlers.
//!
//! An [`EventHandler`] is a cheap, cloneable handle to a shared handler record.
//! Cloning the handle retains the record; dropping a handle releases it. When
//! the last handle goes away the record's context payload is destroyed and the
//! record is freed, exactly once.
//!
//! Registering a handler with [`EventSystem::add_handler`](crate::EventSystem::add_handler)
//! moves that handle into the system. Keep a clone if you need to refer to the
//! handler later (for example to remove it).

use crate::event::Event;
use crate::payload::Payload;
use crate::system::EventSystem;
use compact_str::CompactString;
use std::fmt;
use std::rc::{Rc, Weak};

/// Signature of a handler callback.
///
/// The callback receives its own handle (for payload access and
/// self-removal), the event being broadcast, and the system doing the
/// broadcasting (for emitting follow-up events or requesting exit).
pub type HandlerFn = dyn Fn(&EventHandler, &Event, &EventSystem);

struct HandlerRecord {
    name: CompactString,
    data: Option<Payload>,
    callback: Box<HandlerFn>,
}

/// Shared handle to a handler record.
#[derive(Clone)]
pub struct EventHandler {
    inner: Rc<HandlerRecord>,
}

/// Non-owning reference to a handler record.
#[derive(Clone)]
pub struct WeakHandler {
    inner: Weak<HandlerRecord>,
}

impl EventHandler {
    /// Creates a handler with no context payload.
    pub fn new<F>(name: &str, callback: F) -> Self
    where
        F: Fn(&EventHandler, &Event, &EventSystem) + 'static,
    {
        Self::from_parts(name, None, Box::new(callback))
    }

    /// Creates a handler that owns `payload` for its whole lifetime.
    pub fn with_payload<F>(name: &str, payload: Payload, callback: F) -> Self
    where
        F: Fn(&EventHandler, &Event, &EventSystem) + 'static,
    {
        Self::from_parts(name, Some(payload), Box::new(callback))
    }

    /// Creates a handler owning `value`, dropped normally with the record.
    pub fn with_data<T, F>(name: &str, value: T, callback: F) -> Self
    where
        T: 'static,
        F: Fn(&EventHandler, &Event, &EventSystem) + 'static,
    {
        Self::with_payload(name, Payload::new(value), callback)
    }

    /// Creates a handler from a raw data/destructor pair.
    ///
    /// # Panics
    ///
    /// Panics if `data` is present without a `destructor`: the record would
    /// otherwise own a value nobody agreed to dispose of.
    pub fn create<T, F>(name: &str, data: Option<T>, destructor: Option<fn(T)>, callback: F) -> Self
    where
        T: 'static,
        F: Fn(&EventHandler, &Event, &EventSystem) + 'static,
    {
        assert!(
            data.is_none() || destructor.is_some(),
            "destructor for non-null handler data is null (handler '{name}')"
        );
        let payload = match (data, destructor) {
            (Some(value), Some(destructor)) => Some(Payload::with_destructor(value, destructor)),
            _ => None,
        };
        Self::from_parts(name, payload, Box::new(callback))
    }

    fn from_parts(name: &str, data: Option<Payload>, callback: Box<HandlerFn>) -> Self {
        Self {
            inner: Rc::new(HandlerRecord {
                name: CompactString::new(name),
                data,
                callback,
            }),
        }
    }

    /// Takes an additional reference. Equivalent to `clone`.
    pub fn retain(&self) -> EventHandler {
        self.clone()
    }

    /// Gives up this reference. Equivalent to `drop`.
    pub fn release(self) {
        drop(self);
    }

    /// Number of live handles to this record.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Calls the handler's callback with `event`.
    pub fn invoke(&self, event: &Event, system: &EventSystem) {
        (self.inner.callback)(self, event, system);
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The context payload, if it is a `T`.
    pub fn data<T: 'static>(&self) -> Option<&T> {
        self.inner.data.as_ref()?.get::<T>()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.inner.data.as_ref()
    }

    pub fn downgrade(&self) -> WeakHandler {
        WeakHandler {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// True if both handles refer to the same record.
    pub fn ptr_eq(&self, other: &EventHandler) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("name", &self.inner.name)
            .field("ref_count", &self.ref_count())
            .field("data", &self.inner.data)
            .finish()
    }
}

impl WeakHandler {
    /// Recovers a strong handle if the record is still alive.
    pub fn upgrade(&self) -> Option<EventHandler> {
        self.inner.upgrade().map(|inner| EventHandler { inner })
    }

    /// True if this reference points at `handler`'s record.
    pub fn points_to(&self, handler: &EventHandler) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&handler.inner))
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl fmt::Debug for WeakHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(handler) => write!(f, "WeakHandler({})", handler.name()),
            None => write!(f, "WeakHandler(<dropped>)"),
        }
    }
}
