//! Row storage shared by the list models.

use crate::list::observer::{row_index, ModelObserver};
use crate::notify::Observers;
use log::{debug, warn};
use std::ops::Range;
use std::rc::Rc;

/// Ordered, append-only rows plus the observers watching them.
#[derive(Debug)]
pub struct RowStore<T> {
    model: &'static str,
    rows: Vec<T>,
    observers: Observers<dyn ModelObserver>,
}

impl<T> RowStore<T> {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            rows: Vec::new(),
            observers: Observers::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn connect(&mut self, observer: Rc<dyn ModelObserver>) {
        self.observers.connect(observer);
    }

    /// Returns the row at a UI index, logging out-of-range reads.
    pub fn get(&self, row: isize) -> Option<&T> {
        match row_index(row, self.rows.len()) {
            Some(index) => self.rows.get(index),
            None => {
                warn!(
                    "event=model_read module=list status=invalid_row model={} row={} row_count={}",
                    self.model,
                    row,
                    self.rows.len()
                );
                None
            }
        }
    }

    /// Row at a known-good index, without logging.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.rows.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn push(&mut self, row: T) -> Range<usize> {
        self.append(vec![row])
    }

    /// Appends `rows` at the end, bracketed by the two observer callbacks.
    ///
    /// Returns the inserted range; an empty batch notifies nobody.
    pub fn append(&mut self, rows: Vec<T>) -> Range<usize> {
        let first = self.rows.len();
        let range = first..first + rows.len();
        if range.is_empty() {
            return range;
        }

        self.observers
            .emit(|observer| observer.rows_about_to_be_inserted(range.clone()));
        self.rows.extend(rows);
        self.observers
            .emit(|observer| observer.rows_inserted(range.clone()));

        debug!(
            "event=rows_inserted module=list status=ok model={} first={} added={}",
            self.model,
            range.start,
            range.len()
        );
        range
    }
}

#[cfg(test)]
mod tests {
    use super::RowStore;
    use crate::list::observer::ModelObserver;
    use std::cell::RefCell;
    use std::ops::Range;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<(&'static str, Range<usize>)>>,
    }

    impl ModelObserver for Recorder {
        fn rows_about_to_be_inserted(&self, range: Range<usize>) {
            self.events.borrow_mut().push(("begin", range));
        }

        fn rows_inserted(&self, range: Range<usize>) {
            self.events.borrow_mut().push(("end", range));
        }
    }

    #[test]
    fn append_brackets_exactly_the_new_rows() {
        let recorder = Rc::new(Recorder::default());
        let mut rows = RowStore::new("test");
        rows.connect(recorder.clone());

        assert_eq!(rows.push(10), 0..1);
        assert_eq!(rows.append(vec![11, 12, 13]), 1..4);
        assert_eq!(rows.append(Vec::new()), 4..4);

        assert_eq!(
            *recorder.events.borrow(),
            vec![("begin", 0..1), ("end", 0..1), ("begin", 1..4), ("end", 1..4)]
        );
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn get_rejects_out_of_range_rows() {
        let mut rows = RowStore::new("test");
        rows.push("a");
        assert_eq!(rows.get(0), Some(&"a"));
        assert_eq!(rows.get(-1), None);
        assert_eq!(rows.get(1), None);
    }
}
