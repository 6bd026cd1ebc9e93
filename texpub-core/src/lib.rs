//! texpub core library — domain types, manifest loading, scanning, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs, including the remote [`Listing`]
//! - [`error`] — [`ManifestError`]
//! - [`manifest`] — `template.yml` loading
//! - [`scan`] — template root discovery
//! - [`digest`] — content digests for change detection

pub mod digest;
pub mod error;
pub mod manifest;
pub mod scan;
pub mod types;

pub use error::ManifestError;
pub use types::{
    LastRun, Listing, ListingEntry, ScannedTemplate, TemplateAssets, TemplateId, TemplateOptions,
};
