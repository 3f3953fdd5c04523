//! Store error types.
//!
//! Batch-level errors describe an item set the table refuses; file errors
//! carry the path and operation that failed.

use std::path::PathBuf;
use thiserror::Error;

/// Table store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Batch holds more items than a single write accepts.
    #[error("batch of {count} items exceeds the limit of {max}")]
    BatchTooLarge { count: usize, max: usize },

    /// An item in the batch has no key attribute.
    #[error("item {index} in batch is missing key attribute '{key}'")]
    MissingKey { index: usize, key: &'static str },

    /// The same key appears twice in one batch.
    #[error("duplicate key '{key}' in batch")]
    DuplicateKey { key: String },

    /// File I/O error.
    #[error("failed to {operation} table file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file exists but belongs to another table.
    #[error("table file {path} holds table '{found}', expected '{expected}'")]
    TableMismatch {
        expected: String,
        found: String,
        path: PathBuf,
    },

    /// Serialization error.
    #[error("failed to serialize table data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("failed to read table data from {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to replace table file {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::BatchTooLarge { count: 30, max: 25 };
        assert_eq!(err.to_string(), "batch of 30 items exceeds the limit of 25");

        let err = StoreError::Io {
            operation: "read",
            path: PathBuf::from("/tmp/table.json"),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(err.to_string(), "failed to read table file: /tmp/table.json");
    }
}
