//! Listing diff engine.
//!
//! Compares the freshly scanned local template set against the previously
//! published listing and decides what to package, upload, and delete.
//! Pure function: no I/O, no logging, fully deterministic.

use std::collections::BTreeSet;

use texpub_core::types::{Listing, ScannedTemplate, TemplateId};

/// The three sets a run acts on, each sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffReport {
    /// Every valid template found locally. The new listing is rebuilt from
    /// exactly this set.
    pub all: Vec<TemplateId>,
    /// Templates that must be (re)packaged and uploaded this run.
    pub to_process: Vec<TemplateId>,
    /// Templates published previously but gone locally; deleted from the
    /// bucket and dropped from the new listing.
    pub to_remove: Vec<TemplateId>,
}

impl DiffReport {
    /// True when the run has no bucket mutations to make beyond re-tagging.
    pub fn is_noop(&self) -> bool {
        self.to_process.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff the scanned templates against the previous listing.
///
/// A template needs processing when it is new, when its content digest
/// differs from the one recorded at last publish, or when the previous
/// entry carries no digest at all (a listing from before digests existed —
/// reprocess conservatively rather than guess).
pub fn diff(templates: &[ScannedTemplate], previous: &Listing) -> DiffReport {
    let local: BTreeSet<TemplateId> = templates.iter().map(|t| t.id.clone()).collect();
    let published = previous.ids();

    let to_remove: Vec<TemplateId> = published.difference(&local).cloned().collect();

    let mut to_process = Vec::new();
    for template in templates {
        let needs_processing = match previous.entry(&template.id) {
            None => true,
            Some(entry) => match &entry.digest {
                None => true,
                Some(digest) => digest != &template.digest,
            },
        };
        if needs_processing {
            to_process.push(template.id.clone());
        }
    }
    to_process.sort();

    DiffReport {
        all: local.into_iter().collect(),
        to_process,
        to_remove,
    }
}
