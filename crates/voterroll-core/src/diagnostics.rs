//! Diagnostic sinks for non-fatal extraction events.
//!
//! The extractor and age calculator never log through global state directly;
//! they report to a [`DiagnosticSink`] supplied by the caller. [`TracingSink`]
//! is the default and forwards everything to `tracing`.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::models::record::Field;

/// A non-fatal event observed while processing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Segmentation produced this many candidate blocks.
    BlocksFound { count: usize },

    /// A record was accepted.
    RecordAccepted { serial_number: String },

    /// A block was dropped because required fields were missing.
    IncompleteRecord {
        serial_number: Option<String>,
        missing: Vec<Field>,
    },

    /// A date of birth matched none of the supported layouts.
    UnparseableDate { value: String },

    /// A document finished processing.
    DocumentProcessed { accepted: usize, skipped: usize },
}

impl Diagnostic {
    /// Whether this diagnostic reports lost or degraded data.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::IncompleteRecord { .. } | Diagnostic::UnparseableDate { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::BlocksFound { count } => {
                write!(f, "split found {} potential records", count)
            }
            Diagnostic::RecordAccepted { serial_number } => {
                write!(f, "added record {}", serial_number)
            }
            Diagnostic::IncompleteRecord {
                serial_number,
                missing,
            } => {
                let missing: Vec<&str> = missing.iter().map(Field::column_name).collect();
                write!(
                    f,
                    "skipped incomplete record {}: missing {}",
                    serial_number.as_deref().unwrap_or("<no serial>"),
                    missing.join(", ")
                )
            }
            Diagnostic::UnparseableDate { value } => {
                write!(f, "could not parse date of birth '{}'", value)
            }
            Diagnostic::DocumentProcessed { accepted, skipped } => {
                write!(
                    f,
                    "processed {} complete records ({} skipped)",
                    accepted, skipped
                )
            }
        }
    }
}

/// Receiver for diagnostics emitted during extraction.
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic.
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic)
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::BlocksFound { .. } | Diagnostic::DocumentProcessed { .. } => {
                info!("{}", diagnostic)
            }
            Diagnostic::RecordAccepted { .. } => debug!("{}", diagnostic),
            Diagnostic::IncompleteRecord { .. } | Diagnostic::UnparseableDate { .. } => {
                warn!("{}", diagnostic)
            }
        }
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    /// Only the diagnostics that report lost or degraded data.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(Diagnostic::is_warning)
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(diagnostic.clone());
        }
    }
}
