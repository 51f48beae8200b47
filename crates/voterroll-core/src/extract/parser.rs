//! Record extractor: segmentation, field matching, and record assembly.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::age::AgeCalculator;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::ExtractionError;
use crate::models::config::VoterRollConfig;
use crate::models::record::{ExtractedRecord, Field, FieldMap, missing_required_fields};
use crate::numerals::normalize_numerals;

use super::Result;
use super::patterns::FIELD_PATTERNS;
use super::segment::{Blocks, preprocess};

/// Extracts structured records from voter roll text.
///
/// Holds no per-document state; one extractor can process any number of
/// documents.
#[derive(Clone)]
pub struct RecordExtractor {
    ages: AgeCalculator,
    sink: Arc<dyn DiagnosticSink>,
}

impl RecordExtractor {
    /// Create an extractor that reports to `tracing` and uses the local date.
    pub fn new() -> Self {
        let sink: Arc<dyn DiagnosticSink> = Arc::new(TracingSink);
        Self {
            ages: AgeCalculator::new().with_sink(sink.clone()),
            sink,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &VoterRollConfig) -> Self {
        let extractor = Self::new();
        match config.extraction.reference_date {
            Some(today) => extractor.with_today(today),
            None => extractor,
        }
    }

    /// Derive ages against a fixed date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.ages = self.ages.with_today(today);
        self
    }

    /// Send diagnostics to `sink` instead of `tracing`.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.ages = self.ages.with_sink(sink.clone());
        self.sink = sink;
        self
    }

    /// Apply the field table to one block.
    pub fn extract_fields(&self, block: &str) -> FieldMap {
        let mut fields = FieldMap::new();

        for pattern in FIELD_PATTERNS.iter() {
            let Some(value) = pattern.capture(block) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            let value = match pattern.field {
                Field::SerialNumber => normalize_numerals(value),
                _ => value.to_string(),
            };
            fields.insert(pattern.field, value);
        }

        fields
    }

    /// Build a record from one block, or `None` if it is incomplete.
    pub fn extract_block(
        &self,
        block: &str,
        default_gender: Option<&str>,
    ) -> Option<ExtractedRecord> {
        let mut fields = self.extract_fields(block);

        if !fields.contains_key(&Field::Gender) {
            if let Some(gender) = default_gender.map(str::trim).filter(|g| !g.is_empty()) {
                fields.insert(Field::Gender, gender.to_string());
            }
        }

        let missing = missing_required_fields(&fields);
        if !missing.is_empty() {
            self.sink.emit(&Diagnostic::IncompleteRecord {
                serial_number: fields.get(&Field::SerialNumber).cloned(),
                missing,
            });
            return None;
        }

        let age = fields
            .get(&Field::DateOfBirth)
            .and_then(|dob| self.ages.compute(dob));

        let record = ExtractedRecord::new(fields, age);
        self.sink.emit(&Diagnostic::RecordAccepted {
            serial_number: record.serial_number().unwrap_or_default().to_string(),
        });
        Some(record)
    }

    /// Lazily yield the complete records of a document, in document order.
    ///
    /// The document is checked up front, so a rejected document yields no
    /// records at all. Incomplete blocks are dropped and reported to the sink
    /// as the iterator reaches them.
    pub fn records<'a>(
        &'a self,
        text: &str,
        default_gender: Option<&'a str>,
    ) -> Result<impl Iterator<Item = ExtractedRecord> + use<'a>> {
        check_document(text)?;

        let text = preprocess(text);
        debug!("Extracting records from {} characters of text", text.len());

        let total = Blocks::new(text.as_str()).count();
        self.sink.emit(&Diagnostic::BlocksFound { count: total });

        let mut blocks = Blocks::new(text);
        let mut accepted = 0;
        let mut finished = false;

        Ok(std::iter::from_fn(move || {
            if finished {
                return None;
            }
            while let Some(range) = blocks.next_range() {
                if let Some(record) = self.extract_block(&blocks.text()[range], default_gender) {
                    accepted += 1;
                    return Some(record);
                }
            }

            finished = true;
            self.sink.emit(&Diagnostic::DocumentProcessed {
                accepted,
                skipped: total - accepted,
            });
            None
        }))
    }

    /// Extract every complete record from a document.
    ///
    /// Incomplete blocks are dropped and reported to the sink. An error means
    /// the document as a whole was rejected and no records are returned.
    pub fn extract(
        &self,
        text: &str,
        default_gender: Option<&str>,
    ) -> Result<Vec<ExtractedRecord>> {
        Ok(self.records(text, default_gender)?.collect())
    }

    /// Decode UTF-8 bytes and extract every complete record.
    pub fn extract_bytes(
        &self,
        data: &[u8],
        default_gender: Option<&str>,
    ) -> Result<Vec<ExtractedRecord>> {
        let text = String::from_utf8(data.to_vec())?;
        self.extract(&text, default_gender)
    }
}

/// Reject documents that are not text at all.
fn check_document(text: &str) -> Result<()> {
    if text.contains('\0') {
        return Err(ExtractionError::Document(
            "document contains binary data".to_string(),
        ));
    }
    Ok(())
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordExtractor")
            .field("ages", &self.ages)
            .finish_non_exhaustive()
    }
}

/// Extract records with the default extractor.
pub fn extract_records(text: &str, default_gender: Option<&str>) -> Result<Vec<ExtractedRecord>> {
    RecordExtractor::new().extract(text, default_gender)
}
