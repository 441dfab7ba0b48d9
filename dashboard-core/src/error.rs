//! Error types
//!
//! Aggregation itself never fails; errors only come from snapshot
//! retrieval and export.

use thiserror::Error;

/// Snapshot retrieval errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::Server(status.as_u16())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// CSV export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No {dataset} records to export")]
    Empty { dataset: String },

    #[error("First {dataset} record has no fields to use as columns")]
    NoColumns { dataset: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export is not valid UTF-8")]
    Encoding,
}
