//! `texpub publish` — sync the template bucket with the local tree.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use texpub_store::{DirBucket, GcsBucket, TemplateStore};
use texpub_sync::{plan, run, DiffReport, LogReporter, SyncOutcome};

use crate::revision;

/// Arguments for `texpub publish`.
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Template root directory (one subdirectory per template).
    #[arg(long, default_value = "latex")]
    pub root: PathBuf,

    /// Target GCS bucket name.
    #[arg(long, env = "BUCKET_NAME", conflicts_with = "bucket_dir")]
    pub bucket: Option<String>,

    /// Cloud project identifier, stamped on every bucket request.
    #[arg(long, env = "GCP_PROJECT_ID")]
    pub project: Option<String>,

    /// Bearer token used to authenticate against the bucket.
    #[arg(long, env = "GCS_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Publish into a local directory instead of GCS (dev/test runs).
    #[arg(long)]
    pub bucket_dir: Option<PathBuf>,

    /// Revision identifier; defaults to `git rev-parse --short HEAD`.
    #[arg(long)]
    pub revision: Option<String>,

    /// Show what would be processed and removed without touching the bucket.
    #[arg(long)]
    pub dry_run: bool,
}

/// Everything a run needs, resolved once at startup.
struct PublishConfig {
    root: PathBuf,
    revision: Option<String>,
    store: TemplateStore,
    dry_run: bool,
}

impl PublishArgs {
    pub fn run(self) -> Result<()> {
        let config = self.into_config()?;

        // Auth and bucket existence are checked before any local work.
        config
            .store
            .verify_access()
            .context("bucket pre-flight check failed")?;

        if config.dry_run {
            let report = plan(&config.root, &config.store).context("dry-run planning failed")?;
            print_plan(&report);
            return Ok(());
        }

        let rev = match config.revision {
            Some(rev) => rev,
            None => revision::current(&PathBuf::from("."))?,
        };
        let outcome = run(&config.root, &rev, &config.store, &LogReporter)
            .context("publish run failed")?;
        print_outcome(&rev, &outcome);
        Ok(())
    }

    fn into_config(self) -> Result<PublishConfig> {
        let store = if let Some(dir) = self.bucket_dir {
            TemplateStore::new(Box::new(DirBucket::new(dir)))
        } else {
            let mut missing = Vec::new();
            if self.bucket.is_none() {
                missing.push("BUCKET_NAME");
            }
            if self.project.is_none() {
                missing.push("GCP_PROJECT_ID");
            }
            if self.token.is_none() {
                missing.push("GCS_ACCESS_TOKEN");
            }
            match (self.project, self.bucket, self.token) {
                (Some(project), Some(bucket), Some(token)) => {
                    TemplateStore::new(Box::new(GcsBucket::new(project, bucket, token)))
                }
                _ => bail!("missing required settings: {}", missing.join(", ")),
            }
        };

        Ok(PublishConfig {
            root: self.root,
            revision: self.revision,
            store,
            dry_run: self.dry_run,
        })
    }
}

fn print_plan(report: &DiffReport) {
    println!(
        "[dry-run] {} local template(s), {} to process, {} to remove",
        report.all.len(),
        report.to_process.len(),
        report.to_remove.len()
    );
    for id in &report.to_process {
        println!("  ~  {id}");
    }
    for id in &report.to_remove {
        println!("  -  {id}");
    }
    if report.is_noop() {
        println!("[dry-run] nothing to do");
    }
}

fn print_outcome(rev: &str, outcome: &SyncOutcome) {
    println!(
        "✓ published listing at revision '{rev}' ({} uploaded, {} unchanged, {} removed)",
        outcome.processed.len(),
        outcome.unchanged,
        outcome.removed.len()
    );
    for id in &outcome.processed {
        println!("  ↑  {id}");
    }
    for id in &outcome.removed {
        println!("  ✗  {id}");
    }
}
