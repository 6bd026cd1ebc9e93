//! Template packaging.
//!
//! Turns one scanned template into a deployable bundle inside the run's
//! working directory:
//!
//! ```text
//! <work_dir>/<id>/template.tar.gz   gzip'd tar of the template directory
//! <work_dir>/<id>/options.json      snapshot of the parsed manifest
//! ```
//!
//! The auxiliary `original/` subtree must never appear in the archive and
//! must survive packaging, success or failure. It is relocated to a hidden
//! sibling of the template directory (same filesystem, so the rename is
//! atomic) and moved back by an RAII guard when packaging ends.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use texpub_core::digest::ORIGINAL_DIR;
use texpub_core::types::{ScannedTemplate, TemplateAssets};

use crate::error::{pkg_io_err, PackageError};

/// File name of the archive inside a bundle.
pub const ARCHIVE_NAME: &str = "template.tar.gz";

/// File name of the options snapshot inside a bundle.
pub const SNAPSHOT_NAME: &str = "options.json";

/// Package `template` into `work_dir`, returning the bundle descriptor.
pub fn package(
    template: &ScannedTemplate,
    work_dir: &Path,
) -> Result<TemplateAssets, PackageError> {
    let bundle_dir = work_dir.join(template.id.to_string());
    std::fs::create_dir_all(&bundle_dir).map_err(|e| pkg_io_err(&bundle_dir, e))?;

    // Holds `original/` out of the template directory until packaging ends.
    let _guard = OriginalGuard::hold(template)?;

    let archive = bundle_dir.join(ARCHIVE_NAME);
    write_archive(&template.path, &archive)?;
    tracing::debug!("archived '{}' to {}", template.id, archive.display());

    let options = bundle_dir.join(SNAPSHOT_NAME);
    let json = serde_json::to_vec_pretty(&template.options)?;
    std::fs::write(&options, json).map_err(|e| pkg_io_err(&options, e))?;

    Ok(TemplateAssets {
        id: template.id.clone(),
        archive,
        options,
    })
}

fn write_archive(src: &Path, dest: &Path) -> Result<(), PackageError> {
    let file = File::create(dest).map_err(|e| pkg_io_err(dest, e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all(".", src)
        .map_err(|e| pkg_io_err(src, e))?;
    let encoder = builder.into_inner().map_err(|e| pkg_io_err(dest, e))?;
    encoder.finish().map_err(|e| pkg_io_err(dest, e))?;
    Ok(())
}

/// Scoped relocation of a template's `original/` directory.
///
/// On drop — normal return or error propagation alike — the directory is
/// moved back where it came from.
struct OriginalGuard {
    original: PathBuf,
    hold: PathBuf,
}

impl OriginalGuard {
    fn hold(template: &ScannedTemplate) -> Result<Option<Self>, PackageError> {
        let original = template.path.join(ORIGINAL_DIR);
        if !original.exists() {
            return Ok(None);
        }
        let parent = template
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| template.path.clone());
        let hold = parent.join(format!(".{}.original.hold", template.id));
        std::fs::rename(&original, &hold).map_err(|e| pkg_io_err(&original, e))?;
        tracing::debug!(
            "relocated {} out of '{}' for archiving",
            ORIGINAL_DIR,
            template.id
        );
        Ok(Some(Self { original, hold }))
    }
}

impl Drop for OriginalGuard {
    fn drop(&mut self) {
        if let Err(err) = std::fs::rename(&self.hold, &self.original) {
            tracing::error!(
                "failed to restore {} to {}: {err}",
                ORIGINAL_DIR,
                self.original.display()
            );
        }
    }
}
