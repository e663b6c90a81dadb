//! Error types for the stats store

use thiserror::Error;

/// Result type for stats store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the stats store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    /// Create an invalid-key error
    pub fn invalid_key(key: impl Into<String>) -> Self {
        StoreError::InvalidKey(key.into())
    }
}
