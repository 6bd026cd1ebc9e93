//! Template storage gateway.
//!
//! # Bucket layout
//!
//! ```text
//! listing.json                         (the remote ledger)
//! templates/
//!   <id>/
//!     template.tar.gz                  (archived template directory)
//!     options.json                     (parsed manifest snapshot)
//! ```
//!
//! The gateway owns key composition and listing (de)serialization; the
//! underlying [`BlobStore`] only moves bytes. No operation retries — a
//! failure surfaces to the orchestrator and aborts the run.

use std::path::Path;

use texpub_core::types::{Listing, TemplateAssets, TemplateId};

use crate::blob::BlobStore;
use crate::error::{io_err, StoreError};

/// Well-known key of the listing document.
pub const LISTING_KEY: &str = "listing.json";

/// Key of a template's archive object.
pub fn archive_key(id: &TemplateId) -> String {
    format!("templates/{id}/template.tar.gz")
}

/// Key of a template's options snapshot object.
pub fn options_key(id: &TemplateId) -> String {
    format!("templates/{id}/options.json")
}

/// Façade over the bucket exposing the four operations the orchestrator needs.
pub struct TemplateStore {
    blob: Box<dyn BlobStore>,
}

impl TemplateStore {
    pub fn new(blob: Box<dyn BlobStore>) -> Self {
        Self { blob }
    }

    /// Startup auth/bucket check. Fail fast, before any local work.
    pub fn verify_access(&self) -> Result<(), StoreError> {
        self.blob.verify()
    }

    /// Fetch the previously published listing.
    ///
    /// `None` means no listing has ever been published (first run); that is
    /// not an error.
    pub fn get_listing(&self) -> Result<Option<Listing>, StoreError> {
        match self.blob.get(LISTING_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Upload one packaged template bundle (archive + options snapshot).
    pub fn push_template_asset(&self, assets: &TemplateAssets) -> Result<(), StoreError> {
        let archive = read_file(&assets.archive)?;
        self.blob
            .put(&archive_key(&assets.id), &archive, "application/gzip")?;

        let options = read_file(&assets.options)?;
        self.blob
            .put(&options_key(&assets.id), &options, "application/json")?;
        Ok(())
    }

    /// Delete both objects of a published template.
    ///
    /// Deleting an id whose objects are already gone succeeds — the goal is
    /// absence, and a half-deleted bundle from an earlier failed run must
    /// not wedge subsequent runs.
    pub fn delete_template_asset(&self, id: &TemplateId) -> Result<(), StoreError> {
        for key in [archive_key(id), options_key(id)] {
            match self.blob.delete(&key) {
                Ok(()) => {}
                Err(StoreError::MissingObject { .. }) => {
                    log::warn!("delete of '{key}': object was already absent");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Replace the listing wholesale.
    pub fn push_listing(&self, listing: &Listing) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(listing)?;
        self.blob.put(LISTING_KEY, &bytes, "application/json")
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, StoreError> {
    std::fs::read(path).map_err(|e| io_err(path, e))
}
