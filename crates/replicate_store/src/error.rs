//! Error type for store operations.

/// Errors raised while reading or writing local state files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    ///
    /// Local files are not validated on load, so malformed content surfaces
    /// here as a generic parse failure rather than a dedicated error kind.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
