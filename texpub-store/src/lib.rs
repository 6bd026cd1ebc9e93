//! # texpub-store
//!
//! Bucket access for the template publisher.
//!
//! [`TemplateStore`] is the gateway the orchestrator talks to; it sits on a
//! [`BlobStore`] implementation — [`GcsBucket`] for real runs, [`DirBucket`]
//! for tests and local publishing.

pub mod blob;
pub mod dir_bucket;
pub mod error;
pub mod gateway;
pub mod gcs;

pub use blob::BlobStore;
pub use dir_bucket::DirBucket;
pub use error::StoreError;
pub use gateway::{archive_key, options_key, TemplateStore, LISTING_KEY};
pub use gcs::GcsBucket;
