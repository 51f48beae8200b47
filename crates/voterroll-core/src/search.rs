//! In-memory filtering of extracted records.

use crate::models::record::{ExtractedRecord, Field};
use crate::numerals::normalize_numerals;

/// Gender value that matches every record ("all").
pub const ANY_GENDER: &str = "সব";

/// A conjunction of per-field criteria.
///
/// Text fields match by case-insensitive substring, with numerals normalized
/// on both sides. Gender must match exactly unless it is [`ANY_GENDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    criteria: Vec<(Field, String)>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion. Blank needles are ignored.
    pub fn with(mut self, field: Field, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        let needle = needle.trim();
        if needle.is_empty() || (field == Field::Gender && needle == ANY_GENDER) {
            return self;
        }
        self.criteria.push((field, needle.to_string()));
        self
    }

    /// Whether no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Whether `record` satisfies every criterion.
    pub fn matches(&self, record: &ExtractedRecord) -> bool {
        self.criteria.iter().all(|(field, needle)| {
            let Some(value) = record.get(*field) else {
                return false;
            };
            match field {
                Field::Gender => value == needle.as_str(),
                _ => fold(value).contains(&fold(needle)),
            }
        })
    }

    /// Records matching this query, in their original order.
    pub fn filter<'r>(&self, records: &'r [ExtractedRecord]) -> Vec<&'r ExtractedRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn fold(text: &str) -> String {
    normalize_numerals(text).to_lowercase()
}
