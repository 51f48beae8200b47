//! Core library for voter roll text extraction.
//!
//! This crate provides:
//! - Bengali/Western numeral normalization
//! - Record segmentation and labeled field extraction from free text
//! - Multi-format date of birth parsing and age derivation
//! - Aggregate analysis and in-memory search over extracted records

pub mod error;
pub mod models;
pub mod numerals;
pub mod extract;
pub mod age;
pub mod diagnostics;
pub mod analysis;
pub mod search;

pub use error::{ExtractionError, Result, VoterRollError};
pub use models::record::{ExtractedRecord, Field};
pub use models::config::VoterRollConfig;
pub use numerals::{normalize_numerals, to_bengali_numerals};
pub use extract::{RecordExtractor, extract_records};
pub use age::{AgeCalculator, DateLayout, compute_age};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, NullSink, TracingSink};
pub use analysis::{RecordSummary, summarize};
pub use search::RecordQuery;
