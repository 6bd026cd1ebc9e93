//! texpub — LaTeX template bucket publisher.
//!
//! # Usage
//!
//! ```text
//! texpub publish [--root <dir>] --bucket <name> --project <id>
//! texpub publish [--root <dir>] --bucket-dir <path>
//! texpub publish --dry-run
//! ```
//!
//! Intended to run once per CI pass: it diffs the local template tree
//! against the published listing and brings the bucket in sync.

mod commands;
mod revision;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::publish::PublishArgs;

#[derive(Parser, Debug)]
#[command(
    name = "texpub",
    version,
    about = "Publish versioned template bundles to an object-storage bucket",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Diff local templates against the published listing and sync the bucket.
    Publish(PublishArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Publish(args) => args.run(),
    }
}
