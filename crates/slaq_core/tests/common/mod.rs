#![allow(dead_code)]

use serde_json::Value;
use slaq_core::{ModelObserver, Record};
use std::cell::RefCell;
use std::ops::Range;

pub fn record(value: Value) -> Record {
    value
        .as_object()
        .cloned()
        .expect("fixture must be a JSON object")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    AboutToInsert(Range<usize>),
    Inserted(Range<usize>),
}

/// Observer that records every row notification it receives.
#[derive(Default)]
pub struct RowRecorder {
    pub events: RefCell<Vec<RowEvent>>,
}

impl RowRecorder {
    pub fn take(&self) -> Vec<RowEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl ModelObserver for RowRecorder {
    fn rows_about_to_be_inserted(&self, range: Range<usize>) {
        self.events
            .borrow_mut()
            .push(RowEvent::AboutToInsert(range));
    }

    fn rows_inserted(&self, range: Range<usize>) {
        self.events.borrow_mut().push(RowEvent::Inserted(range));
    }
}
