//! Sync orchestration.
//!
//! ## Run sequence
//!
//! 1. Fetch the previous listing (absent ⇒ empty, first-ever run).
//! 2. Scan the template root and diff against the listing.
//! 3. Package every template in `to_process` into a run-scoped temp
//!    directory — all of them, before any upload, so a packaging failure
//!    leaves the bucket completely untouched.
//! 4. Upload every bundle; the first failure aborts with the previous
//!    listing still authoritative.
//! 5. Delete removed templates, continue-on-error; any failure fails the
//!    run after all deletions were attempted, without republishing.
//! 6. Rebuild the listing wholesale from the scan (fresh metadata for all
//!    current templates, not just the processed ones) and push it.
//!
//! Steps run sequentially in id order; every upload therefore completes
//! before the listing publish, which is the one ordering the design
//! actually requires.

use std::path::Path;

use chrono::Utc;

use texpub_core::scan::scan_templates;
use texpub_core::types::{LastRun, Listing, ListingEntry, TemplateId};
use texpub_store::TemplateStore;

use crate::diff::{diff, DiffReport};
use crate::error::SyncError;
use crate::observer::{SyncObserver, SyncState};
use crate::package::package;

/// Summary of a completed publish run.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Templates that were packaged and uploaded this run.
    pub processed: Vec<TemplateId>,
    /// Templates deleted from the bucket.
    pub removed: Vec<TemplateId>,
    /// Valid local templates that needed no work.
    pub unchanged: usize,
    /// The listing that was published.
    pub listing: Listing,
}

/// Compute what a run would do, without mutating anything.
///
/// Backs `texpub publish --dry-run`.
pub fn plan(root: &Path, store: &TemplateStore) -> Result<DiffReport, SyncError> {
    let previous = store.get_listing()?.unwrap_or_default();
    let templates = scan_templates(root)?;
    Ok(diff(&templates, &previous))
}

/// Run a full publish pass and return its outcome.
///
/// `revision` is stamped into every listing entry and into `lastrun`. On
/// any error the observer sees [`SyncState::Failed`] and the bucket listing
/// remains whatever the last successful run published.
pub fn run(
    root: &Path,
    revision: &str,
    store: &TemplateStore,
    observer: &dyn SyncObserver,
) -> Result<SyncOutcome, SyncError> {
    observer.on_state(SyncState::Init);
    let result = run_inner(root, revision, store, observer);
    match &result {
        Ok(_) => observer.on_state(SyncState::Done),
        Err(_) => observer.on_state(SyncState::Failed),
    }
    result
}

fn run_inner(
    root: &Path,
    revision: &str,
    store: &TemplateStore,
    observer: &dyn SyncObserver,
) -> Result<SyncOutcome, SyncError> {
    let previous = store.get_listing()?.unwrap_or_default();
    observer.on_state(SyncState::ListingFetched);

    let templates = scan_templates(root)?;
    let report = diff(&templates, &previous);
    observer.on_state(SyncState::Diffed);

    // Working directory scoped to the run; released on every exit path.
    let work_dir = tempfile::tempdir().map_err(|e| SyncError::Io {
        path: std::env::temp_dir(),
        source: e,
    })?;

    let mut bundles = Vec::new();
    for template in templates.iter().filter(|t| report.to_process.contains(&t.id)) {
        let assets = package(template, work_dir.path()).map_err(|source| SyncError::Package {
            id: template.id.clone(),
            source,
        })?;
        observer.on_template_packaged(&template.id);
        bundles.push(assets);
    }
    observer.on_state(SyncState::Packaged);

    for assets in &bundles {
        store
            .push_template_asset(assets)
            .map_err(|source| SyncError::Upload {
                id: assets.id.clone(),
                source,
            })?;
        observer.on_template_uploaded(&assets.id);
    }
    observer.on_state(SyncState::Uploaded);

    // A single failed deletion must not block the others, but the listing
    // cannot be republished unless the bucket matches it.
    let mut failed = Vec::new();
    for id in &report.to_remove {
        match store.delete_template_asset(id) {
            Ok(()) => observer.on_template_removed(id),
            Err(err) => {
                tracing::error!("failed to delete '{id}': {err}");
                failed.push(id.clone());
            }
        }
    }
    if !failed.is_empty() {
        return Err(SyncError::Prune { failed });
    }
    observer.on_state(SyncState::Pruned);

    let listing = build_listing(&templates, revision);
    store
        .push_listing(&listing)
        .map_err(|source| SyncError::Publish { source })?;
    observer.on_state(SyncState::ListingPublished);

    Ok(SyncOutcome {
        unchanged: report.all.len() - report.to_process.len(),
        processed: report.to_process,
        removed: report.to_remove,
        listing,
    })
}

/// Derive the new listing from the scan — a complete rewrite, never a merge.
fn build_listing(templates: &[texpub_core::types::ScannedTemplate], revision: &str) -> Listing {
    let all = templates
        .iter()
        .map(|t| ListingEntry {
            id: t.id.clone(),
            commit: revision.to_owned(),
            digest: Some(t.digest.clone()),
            metadata: t.options.metadata.clone(),
        })
        .collect();
    Listing {
        all,
        lastrun: LastRun {
            commit: revision.to_owned(),
        },
        generated_at: Utc::now(),
    }
}
