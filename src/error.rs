//! Error types for the data-access core
//!
//! The cache layer is fail-open by design and never surfaces errors to
//! callers; the variants here cover the remaining failure classes:
//! configuration mistakes, serialization problems, storage diagnostics,
//! and fetch/retry failures in the repository layer.

use thiserror::Error;

/// Main error type for data-access operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Configuration error - invalid strategy wiring or builder input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Persistent storage error (diagnostic only; the cache layer
    /// downgrades these to misses before they reach callers)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Raw data fetch failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// All retry attempts were exhausted
    #[error("Fetch failed after {attempts} attempts: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for data-access operations
pub type Result<T> = std::result::Result<T, DataError>;

impl From<String> for DataError {
    fn from(s: String) -> Self {
        DataError::Other(s)
    }
}

impl From<&str> for DataError {
    fn from(s: &str) -> Self {
        DataError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Serialization(e.to_string())
    }
}
