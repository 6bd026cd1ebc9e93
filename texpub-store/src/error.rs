//! Error types for texpub-store.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from bucket access.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The bucket is unreachable or the credentials were rejected.
    #[error("cannot access bucket '{bucket}': {message}")]
    Auth { bucket: String, message: String },

    /// A remote call failed (network, quota, server error).
    #[error("request failed for object '{key}': {source}")]
    Http {
        key: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// Local I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A delete targeted an object that does not exist.
    #[error("object '{key}' not found")]
    MissingObject { key: String },

    /// Listing (de)serialization error.
    #[error("listing JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}
