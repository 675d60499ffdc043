/// Cursor over the live handler sequence
use crate::handler::EventHandler;
use std::cell::RefCell;

/// Walks the handler sequence by index, as it exists at each step.
///
/// No snapshot is taken. Each step borrows the sequence just long enough to
/// clone the handle at the current index, so the caller is free to invoke the
/// handler (which may append handlers or emit events) between steps. Handlers
/// appended mid-walk may or may not be reached.
pub struct HandlerIter<'a> {
    handlers: &'a RefCell<Vec<EventHandler>>,
    index: usize,
}

impl<'a> HandlerIter<'a> {
    pub(crate) fn new(handlers: &'a RefCell<Vec<EventHandler>>) -> Self {
        Self { handlers, index: 0 }
    }

    /// Index of the next handler to be returned.
    pub fn position(&self) -> usize {
        self.index
    }
}

impl Iterator for HandlerIter<'_> {
    type Item = EventHandler;

    fn next(&mut self) -> Option<EventHandler> {
        let handler = self.handlers.borrow().get(self.index).cloned()?;
        self.index += 1;
        Some(handler)
    }
}
