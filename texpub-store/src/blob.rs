//! Opaque key-value blob store abstraction.
//!
//! The gateway composes object keys; implementations only move bytes.

use crate::error::StoreError;

/// A remote (or remote-like) bucket of named byte blobs.
pub trait BlobStore {
    /// Check that the bucket exists and the credentials are accepted.
    ///
    /// Called once at startup, before any local work.
    fn verify(&self) -> Result<(), StoreError>;

    /// Fetch the object at `key`; `None` if it does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Create or replace the object at `key`.
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StoreError>;

    /// Delete the object at `key`.
    ///
    /// Returns [`StoreError::MissingObject`] if it did not exist.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
