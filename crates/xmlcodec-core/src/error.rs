//! Error types for the xmlcodec core.

use std::path::PathBuf;

/// Core error type for configuration and path handling.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The path could not be normalized.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The path as supplied by the caller.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
