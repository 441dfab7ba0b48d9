//! Record Filter
//!
//! Coarse, field-agnostic substring filter: a record matches when its full
//! JSON serialization, lower-cased, contains the filter text. Every field
//! is scanned, including ones the pipeline does not know about.

use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    needle: String,
}

impl RecordFilter {
    /// Lower-cases the filter text once
    pub fn new(filter_text: &str) -> Self {
        Self {
            needle: filter_text.to_lowercase(),
        }
    }

    /// Empty filter matches everything
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches<T: Serialize>(&self, record: &T) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        match serde_json::to_string(record) {
            Ok(serialized) => serialized.to_lowercase().contains(&self.needle),
            Err(e) => {
                log::debug!("Record not serializable, excluded by filter: {}", e);
                false
            }
        }
    }

    /// Borrowing filter over a slice, preserving order
    pub fn apply<'a, T: Serialize>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

/// One-shot form of [`RecordFilter::matches`]
pub fn matches<T: Serialize>(record: &T, filter_text: &str) -> bool {
    RecordFilter::new(filter_text).matches(record)
}
