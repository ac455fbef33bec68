//! Storage error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Insert collided with an existing identifier.
    #[error("identifier already stored: {uid}")]
    Duplicate {
        /// The colliding identifier.
        uid: String,
    },

    /// Serialization or deserialization of a record failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error (file system, database).
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
