//! Per-template manifest loading.
//!
//! Each template directory carries a `template.yml` describing the template:
//!
//! ```text
//! metadata:
//!   name: ACME Thesis
//!   version: "2.1"
//! engine: xelatex        # any further keys are preserved verbatim
//! ```
//!
//! Loading is side-effect free and idempotent; callers may re-load at will.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::{io_err, ManifestError};
use crate::types::TemplateOptions;

/// Manifest file name expected inside every template directory.
pub const MANIFEST_FILE: &str = "template.yml";

/// Raw manifest shape: `metadata` is optional here so its absence maps to
/// [`ManifestError::MissingMetadata`] instead of an opaque serde error.
#[derive(Debug, Deserialize)]
struct RawOptions {
    metadata: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Load and validate the options for the template at `template_dir`.
///
/// Returns [`ManifestError::NotFound`] if `template.yml` is absent,
/// [`ManifestError::Parse`] if malformed, [`ManifestError::MissingMetadata`]
/// if the required `metadata` map is missing.
pub fn load_options(template_dir: &Path) -> Result<TemplateOptions, ManifestError> {
    let path = template_dir.join(MANIFEST_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ManifestError::NotFound { path })
        }
        Err(err) => return Err(io_err(&path, err)),
    };

    let raw: RawOptions = serde_yaml::from_str(&contents).map_err(|e| ManifestError::Parse {
        path: path.clone(),
        source: e,
    })?;

    let Some(metadata) = raw.metadata else {
        return Err(ManifestError::MissingMetadata { path });
    };

    Ok(TemplateOptions {
        metadata,
        extra: raw.extra,
    })
}
