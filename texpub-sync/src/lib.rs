//! # texpub-sync
//!
//! The synchronization engine: listing diff, template packaging, and the
//! publish orchestrator.
//!
//! Call [`run`] to execute one publish pass against a
//! [`texpub_store::TemplateStore`], or [`plan`] to see what a pass would do.

pub mod diff;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod package;

pub use diff::{diff, DiffReport};
pub use error::{PackageError, SyncError};
pub use observer::{LogReporter, NullObserver, SyncObserver, SyncState};
pub use orchestrator::{plan, run, SyncOutcome};
