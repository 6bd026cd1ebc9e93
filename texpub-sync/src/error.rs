//! Error types for texpub-sync.

use std::path::PathBuf;

use thiserror::Error;

use texpub_core::error::ManifestError;
use texpub_core::types::TemplateId;
use texpub_store::StoreError;

/// Errors from packaging a single template.
#[derive(Debug, Error)]
pub enum PackageError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options snapshot serialization error.
    #[error("options snapshot JSON error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Convenience constructor for [`PackageError::Io`].
pub(crate) fn pkg_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PackageError {
    PackageError::Io {
        path: path.into(),
        source,
    }
}

/// All errors that can arise from a publish run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Template root scanning failed (hard I/O, not a per-template skip).
    #[error("scan error: {0}")]
    Manifest(#[from] ManifestError),

    /// Packaging failed for one template; the run aborts before any upload.
    #[error("packaging failed for '{id}': {source}")]
    Package {
        id: TemplateId,
        #[source]
        source: PackageError,
    },

    /// An upload failed; the previous listing remains authoritative.
    #[error("upload failed for '{id}': {source}")]
    Upload {
        id: TemplateId,
        #[source]
        source: StoreError,
    },

    /// One or more deletions failed after all were attempted; the listing is
    /// not republished because bucket state cannot be trusted.
    #[error("failed to delete {} removed template(s): {}", failed.len(), list_ids(failed))]
    Prune { failed: Vec<TemplateId> },

    /// Publishing the new listing failed.
    #[error("listing publish failed: {source}")]
    Publish {
        #[source]
        source: StoreError,
    },

    /// Listing fetch or other gateway failure.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn list_ids(ids: &[TemplateId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
