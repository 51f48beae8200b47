//! Data models for extracted records and configuration.

pub mod config;
pub mod record;

pub use config::{AnalysisConfig, ExtractionConfig, OutputConfig, OutputFormat, VoterRollConfig};
pub use record::{ExtractedRecord, Field, FieldMap, REQUIRED_FIELDS};
