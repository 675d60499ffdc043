//! Owned, type-erased payloads for events and handlers.
//!
//! A [`Payload`] owns exactly one value of any `'static` type. When the payload
//! is dropped the value is either handed to a custom destructor or dropped
//! normally, and this happens exactly once.

use std::any::Any;
use std::fmt;

type Destructor = Box<dyn FnOnce(Box<dyn Any>)>;

/// An opaque owned value with an optional custom destructor.
///
/// The event system never inspects, clones or copies a payload. Consumers
/// recover the concrete value with [`Payload::get`].
///
/// # Examples
///
/// ```rust
/// use metronome_event_system::Payload;
///
/// let payload = Payload::with_destructor(String::from("level-1"), |name| {
///     println!("unloading {name}");
/// });
/// assert_eq!(payload.get::<String>().map(String::as_str), Some("level-1"));
/// // "unloading level-1" is printed when `payload` goes out of scope
/// ```
pub struct Payload {
    value: Option<Box<dyn Any>>,
    destructor: Option<Destructor>,
    type_name: &'static str,
}

impl Payload {
    /// Wraps `value`; it is dropped normally when the payload is destroyed.
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            value: Some(Box::new(value)),
            destructor: None,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wraps `value` and hands it to `destructor` when the payload is destroyed.
    pub fn with_destructor<T, F>(value: T, destructor: F) -> Self
    where
        T: 'static,
        F: FnOnce(T) + 'static,
    {
        let destructor: Destructor = Box::new(move |boxed: Box<dyn Any>| {
            if let Ok(value) = boxed.downcast::<T>() {
                destructor(*value);
            }
        });
        Self {
            value: Some(Box::new(value)),
            destructor: Some(destructor),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrows the value if it is a `T`.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.value.as_deref()?.downcast_ref::<T>()
    }

    /// Returns true if the value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Whether a custom destructor was supplied.
    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }

    /// Type name of the wrapped value, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Drop for Payload {
    fn drop(&mut self) {
        if let (Some(value), Some(destructor)) = (self.value.take(), self.destructor.take()) {
            destructor(value);
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_name", &self.type_name)
            .field("has_destructor", &self.has_destructor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_custom_destructor_runs_once_with_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let payload = Payload::with_destructor(7u32, move |v| sink.borrow_mut().push(v));
        assert!(payload.has_destructor());
        assert!(seen.borrow().is_empty());

        drop(payload);
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_plain_payload_drops_value() {
        struct Tracked(Rc<Cell<u32>>);
        impl Drop for Tracked {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let payload = Payload::new(Tracked(drops.clone()));
        assert!(!payload.has_destructor());
        drop(payload);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_typed_access() {
        let payload = Payload::new(String::from("hello"));
        assert_eq!(payload.get::<String>().unwrap(), "hello");
        assert!(payload.get::<u32>().is_none());
        assert!(payload.is::<String>());
        assert!(payload.type_name().contains("String"));
    }
}
