//! Error types for the tracker.

use thiserror::Error;

/// Result type for tracker operations.
pub type ShinyResult<T> = Result<T, ShinyError>;

/// Errors that can occur outside the infallible in-memory paths.
#[derive(Debug, Error)]
pub enum ShinyError {
    /// Filesystem access failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage backend refused the operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A hunt method name was not recognized.
    #[error("unknown hunt method: {0} (expected wild, outbreak, or masuda)")]
    UnknownMethod(String),

    /// No archived session matches the given id.
    #[error("no archived session matches '{0}'")]
    SessionNotFound(String),

    /// An id prefix matches more than one archived session.
    #[error("id prefix '{0}' matches more than one archived session")]
    AmbiguousId(String),

    /// No data directory was configured and none could be derived.
    #[error("cannot determine a data directory; pass one explicitly")]
    NoDataDir,
}
