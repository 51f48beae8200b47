//! Error types for the voterroll-core library.

use thiserror::Error;

/// Main error type for the voterroll library.
#[derive(Error, Debug)]
pub enum VoterRollError {
    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Document-level extraction failures.
///
/// Problems confined to a single record never surface here; they are
/// reported through a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink)
/// and the record is dropped.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document bytes are not valid UTF-8.
    #[error("failed to decode document: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The document could not be processed as a whole.
    #[error("failed to process document: {0}")]
    Document(String),
}

/// Result type for the voterroll library.
pub type Result<T> = std::result::Result<T, VoterRollError>;
