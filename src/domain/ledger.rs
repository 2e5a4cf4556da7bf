//! The ordered collection of expense records for a session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::expense::ExpenseRecord;

/// Ordered sequence of expense records, newest first. Stored JSON is the
/// bare array of records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    /// Prepends a record so the ledger stays newest-first. Ids are assigned
    /// at creation and never reused; a collision indicates a caller bug.
    pub fn prepend(&mut self, record: ExpenseRecord) {
        debug_assert!(!self.contains(record.id), "duplicate expense id");
        self.records.insert(0, record);
    }

    /// Removes the record with a matching id. Absent ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<ExpenseRecord> {
        let index = self.records.iter().position(|record| record.id == id)?;
        Some(self.records.remove(index))
    }

    /// Empties the ledger, returning how many records were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.records.len();
        self.records.clear();
        dropped
    }
}
