//! Error types for the worker cache registry.
//!
//! Resolving the execution context never fails from the caller's point of
//! view (a failed lookup selects the fallback store), so the only errors are
//! caller usage errors and configuration problems.

use thiserror::Error;

/// Main error type for the worker cache registry.
#[derive(Debug, Error)]
pub enum WorkerCacheError {
    #[error("Named cache not found: {name}")]
    KeyNotFound { name: String },

    #[error("Cache name must not be empty")]
    InvalidName,

    #[error("Named cache is already held on this thread: {name}")]
    CacheInUse { name: String },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for worker cache operations.
pub type Result<T> = std::result::Result<T, WorkerCacheError>;

impl From<serde_json::Error> for WorkerCacheError {
    fn from(err: serde_json::Error) -> Self {
        WorkerCacheError::Config {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl WorkerCacheError {
    /// Whether this error reports a missing named cache.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WorkerCacheError::KeyNotFound { .. })
    }
}
