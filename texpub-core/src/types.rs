//! Domain types for texpub.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! The [`Listing`] types mirror the wire shape of the remote `listing.json`
//! document exactly and are serializable via serde + serde_json.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a template.
///
/// Template identity is the name of its directory under the template root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub String);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Manifest options
// ---------------------------------------------------------------------------

/// Parsed `template.yml` options for one template.
///
/// The `metadata` sub-map is required and is flattened verbatim into the
/// template's listing entry at publish time. Everything else in the manifest
/// is preserved in `extra` so the options snapshot round-trips unknown keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateOptions {
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Remote listing
// ---------------------------------------------------------------------------

/// One published template in the remote listing.
///
/// `digest` is the content digest of the template directory at the time it
/// was last packaged; it is the change-detection signal for later runs.
/// Listings written before digests existed deserialize with `digest: None`
/// and are treated as needing reprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub id: TemplateId,
    pub commit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Revision stamp of the run that produced a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRun {
    pub commit: String,
}

/// The remote ledger of all currently published templates.
///
/// This document is the single source of truth for "what was previously
/// published"; the diff engine never inspects bucket object listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub all: Vec<ListingEntry>,
    pub lastrun: LastRun,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            lastrun: LastRun {
                commit: String::new(),
            },
            generated_at: Utc::now(),
        }
    }
}

impl Listing {
    /// The set of template ids in this listing.
    pub fn ids(&self) -> BTreeSet<TemplateId> {
        self.all.iter().map(|e| e.id.clone()).collect()
    }

    /// Look up the entry for `id`, if present.
    pub fn entry(&self, id: &TemplateId) -> Option<&ListingEntry> {
        self.all.iter().find(|e| &e.id == id)
    }
}

// ---------------------------------------------------------------------------
// Run-scoped records
// ---------------------------------------------------------------------------

/// A template discovered by scanning the local template root.
///
/// Exists only for the duration of one run; only its derived listing entry
/// is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTemplate {
    pub id: TemplateId,
    /// Absolute path of the template directory.
    pub path: PathBuf,
    pub options: TemplateOptions,
    /// Content digest over the directory (excluding `original/`).
    pub digest: String,
}

/// Packaged bundle for one template, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAssets {
    pub id: TemplateId,
    /// Path to the gzip'd tar archive of the template directory.
    pub archive: PathBuf,
    /// Path to the serialized options snapshot.
    pub options: PathBuf,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
