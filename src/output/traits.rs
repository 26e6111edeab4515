//! Output handler traits and types
//!
//! This module defines the trait interface the batch driver writes results
//! through, and the error type shared by all writers.

use crate::crawler::UrlAudit;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid results JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for accumulated audit results
///
/// Both methods receive the full result list so far; implementations
/// overwrite rather than append.
pub trait ResultSink {
    /// Persists partial results during the run
    fn checkpoint(&mut self, results: &[UrlAudit]) -> OutputResult<()>;

    /// Persists the final results once every URL has been audited
    fn finalize(&mut self, results: &[UrlAudit]) -> OutputResult<()>;
}
