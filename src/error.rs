//! Charlotte Error Types
//!
//! Centralized error handling. "No match" is never an error here: the
//! resolver and selector report it as data.

use thiserror::Error;

/// Central error type for Charlotte
#[derive(Error, Debug)]
pub enum CharlotteError {
    #[error("Malformed catalog entry at row {row}: {reason}")]
    MalformedEntry { row: usize, reason: String },

    #[error("Duplicate file name in catalog: {0}")]
    DuplicateFileName(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Charlotte operations
pub type CharlotteResult<T> = Result<T, CharlotteError>;

/// Helper to convert lock poison errors
impl<T> From<std::sync::PoisonError<T>> for CharlotteError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        CharlotteError::Lock(err.to_string())
    }
}
