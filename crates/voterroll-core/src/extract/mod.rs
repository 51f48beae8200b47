//! Record extraction from free-text voter rolls.

mod parser;
pub mod patterns;
pub mod segment;

pub use parser::{RecordExtractor, extract_records};
pub use patterns::{CaptureMode, FIELD_PATTERNS, FieldPattern};
pub use segment::{preprocess, split_records};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
