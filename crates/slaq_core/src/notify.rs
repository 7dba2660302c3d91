//! Synchronous observer lists.
//!
//! Notifications are delivered in connection order on the calling thread,
//! inside the call that caused them.

use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Ordered list of connected observers of one kind.
pub struct Observers<T: ?Sized> {
    entries: Vec<Rc<T>>,
}

impl<T: ?Sized> Observers<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn connect(&mut self, observer: Rc<T>) {
        self.entries.push(observer);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls `notify` once for every connected observer.
    pub fn emit(&self, mut notify: impl FnMut(&T)) {
        for observer in &self.entries {
            notify(observer.as_ref());
        }
    }

    /// Clones the current observer handles.
    ///
    /// Used when the emitter has to release a borrow before notifying.
    pub fn snapshot(&self) -> Vec<Rc<T>> {
        self.entries.clone()
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Debug for Observers<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("connected", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Observers;
    use std::cell::RefCell;
    use std::rc::Rc;

    trait Ping {
        fn ping(&self, value: u32);
    }

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<u32>>,
    }

    impl Ping for Recorder {
        fn ping(&self, value: u32) {
            self.seen.borrow_mut().push(value);
        }
    }

    #[test]
    fn emits_to_every_observer_in_connection_order() {
        let first = Rc::new(Recorder::default());
        let second = Rc::new(Recorder::default());
        let mut observers: Observers<dyn Ping> = Observers::new();
        assert!(observers.is_empty());

        observers.connect(first.clone());
        observers.connect(second.clone());
        observers.emit(|o| o.ping(7));

        assert_eq!(observers.len(), 2);
        assert_eq!(*first.seen.borrow(), vec![7]);
        assert_eq!(*second.seen.borrow(), vec![7]);
        assert_eq!(format!("{observers:?}"), "Observers { connected: 2 }");
    }
}
