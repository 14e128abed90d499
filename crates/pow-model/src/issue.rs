//! Error Record log.
//!
//! Non-fatal trouble found while mapping a record (parse trash, implausible
//! dates, name re-rendering mismatches) is appended here and never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One advisory issue found in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub record_id: String,
    /// Resolved display name of the record, when known.
    pub name: String,
    pub column: String,
    pub message: String,
    /// Offending raw value.
    pub value: String,
}

impl ErrorRecord {
    pub fn new(
        record_id: impl Into<String>,
        name: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            name: name.into(),
            column: column.into(),
            message: message.into(),
            value: value.into(),
        }
    }
}

/// Append-only, insertion-ordered error log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    /// Append all records of `other`, keeping their order.
    pub fn extend(&mut self, other: ErrorLog) {
        self.records.extend(other.records);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records per column, for summaries.
    pub fn count_by_column(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.column.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl IntoIterator for ErrorLog {
    type Item = ErrorRecord;
    type IntoIter = std::vec::IntoIter<ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<ErrorRecord> for ErrorLog {
    fn from_iter<I: IntoIterator<Item = ErrorRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
