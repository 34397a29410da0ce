//! Error types for the hunting pipeline.

use thiserror::Error;

/// Errors that can occur while hunting over a batch of alerts.
#[derive(Error, Debug)]
pub enum HuntError {
    /// An alert is missing a required field. This is a caller bug, not a
    /// recoverable runtime condition: the whole batch fails.
    #[error("Alert at index {index} is missing required field: {field}")]
    MissingField {
        /// Position of the offending alert in the input batch.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Snapshot I/O failed: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for hunting operations.
pub type HuntResult<T> = Result<T, HuntError>;
