//! # Feed
//!
//! The ordered, append-only list of records fetched in the current session.
//! A refresh is the only thing that shrinks it.

use crate::directory::{Page, Record};

#[derive(Debug, Default)]
pub struct Feed {
    records: Vec<Record>,
    pages_loaded: usize,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a whole page in arrival order. No deduplication: a record
    /// fetched twice shows up twice.
    pub fn append(&mut self, page: Page) {
        self.records.extend(page.records);
        self.pages_loaded += 1;
    }

    /// Empties the feed for a new session.
    pub fn reset(&mut self) {
        self.records.clear();
        self.pages_loaded = 0;
    }

    /// Read-only view of every record, in fetch order.
    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }
}
