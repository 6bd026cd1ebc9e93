//! Run lifecycle observation.
//!
//! The orchestrator performs no direct logging; it reports lifecycle
//! transitions through an injected [`SyncObserver`]. [`LogReporter`] is the
//! production implementation; tests substitute recording observers.

use std::fmt;

use texpub_core::types::TemplateId;

/// States of a publish run, in order of a successful pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Init,
    ListingFetched,
    Diffed,
    Packaged,
    Uploaded,
    Pruned,
    ListingPublished,
    Done,
    Failed,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncState::Init => "init",
            SyncState::ListingFetched => "listing-fetched",
            SyncState::Diffed => "diffed",
            SyncState::Packaged => "packaged",
            SyncState::Uploaded => "uploaded",
            SyncState::Pruned => "pruned",
            SyncState::ListingPublished => "listing-published",
            SyncState::Done => "done",
            SyncState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Callbacks the orchestrator invokes at defined lifecycle points.
///
/// All methods default to no-ops so observers implement only what they need.
pub trait SyncObserver {
    fn on_state(&self, _state: SyncState) {}
    fn on_template_packaged(&self, _id: &TemplateId) {}
    fn on_template_uploaded(&self, _id: &TemplateId) {}
    fn on_template_removed(&self, _id: &TemplateId) {}
}

/// Observer that reports through the `log` facade.
#[derive(Debug, Default)]
pub struct LogReporter;

impl SyncObserver for LogReporter {
    fn on_state(&self, state: SyncState) {
        tracing::info!("run state: {state}");
    }

    fn on_template_packaged(&self, id: &TemplateId) {
        tracing::info!("packaged: {id}");
    }

    fn on_template_uploaded(&self, id: &TemplateId) {
        tracing::info!("uploaded: {id}");
    }

    fn on_template_removed(&self, id: &TemplateId) {
        tracing::info!("removed: {id}");
    }
}

/// Observer that ignores everything. Used by dry-run planning.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SyncObserver for NullObserver {}
