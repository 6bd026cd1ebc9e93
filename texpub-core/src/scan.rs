//! Local template root scanning.
//!
//! Each immediate subdirectory of the template root holding a parsable
//! `template.yml` is a template. Directories with a missing or broken
//! manifest are logged and skipped — a single bad template never aborts
//! the run. Results are sorted by id for reproducible logs and diffs.
//!
//! A root that does not exist at all is an error, not an empty scan: an
//! empty scan schedules every published template for deletion, and a
//! mistyped root must not wipe the bucket.

use std::path::Path;

use crate::digest::digest_template;
use crate::error::{io_err, ManifestError};
use crate::manifest::load_options;
use crate::types::{ScannedTemplate, TemplateId};

/// Scan `root` for valid templates.
///
/// An existing root with no valid template directories yields an empty set.
/// A nonexistent root is [`ManifestError::RootNotFound`].
pub fn scan_templates(root: &Path) -> Result<Vec<ScannedTemplate>, ManifestError> {
    if !root.is_dir() {
        return Err(ManifestError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut entries: Vec<_> = std::fs::read_dir(root)
        .map_err(|e| io_err(root, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut templates = Vec::new();
    for entry in entries {
        let id = TemplateId::from(entry.file_name().to_string_lossy().into_owned());
        let path = entry.path();

        let options = match load_options(&path) {
            Ok(options) => options,
            Err(err @ ManifestError::Io { .. }) => return Err(err),
            Err(err) => {
                log::warn!("skipping template '{id}': {err}");
                continue;
            }
        };

        let digest = digest_template(&path)?;
        templates.push(ScannedTemplate {
            id,
            path,
            options,
            digest,
        });
    }
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_template(root: &Path, id: &str, name: &str) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(
            dir.join("template.yml"),
            format!("metadata:\n  name: {name}\n"),
        )
        .expect("manifest");
        fs::write(dir.join("main.tex"), "\\documentclass{article}\n").expect("tex");
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = TempDir::new().expect("tempdir");
        let err = scan_templates(&root.path().join("latex")).unwrap_err();
        assert!(matches!(err, ManifestError::RootNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn empty_root_scans_empty() {
        let root = TempDir::new().expect("tempdir");
        let templates = scan_templates(root.path()).expect("scan");
        assert!(templates.is_empty());
    }

    #[test]
    fn templates_are_sorted_by_id() {
        let root = TempDir::new().expect("tempdir");
        make_template(root.path(), "zeta", "Z");
        make_template(root.path(), "alpha", "A");
        make_template(root.path(), "mid", "M");

        let templates = scan_templates(root.path()).expect("scan");
        let ids: Vec<_> = templates.iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn directory_without_manifest_is_skipped() {
        let root = TempDir::new().expect("tempdir");
        make_template(root.path(), "good", "G");
        fs::create_dir_all(root.path().join("no_manifest")).expect("mkdir");

        let templates = scan_templates(root.path()).expect("scan");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, TemplateId::from("good"));
    }

    #[test]
    fn directory_with_broken_manifest_is_skipped() {
        let root = TempDir::new().expect("tempdir");
        make_template(root.path(), "good", "G");
        let bad = root.path().join("bad");
        fs::create_dir_all(&bad).expect("mkdir");
        fs::write(bad.join("template.yml"), ": not yaml ::\n").expect("write");

        let templates = scan_templates(root.path()).expect("scan");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, TemplateId::from("good"));
    }

    #[test]
    fn hidden_directories_and_plain_files_are_ignored() {
        let root = TempDir::new().expect("tempdir");
        make_template(root.path(), "good", "G");
        fs::create_dir_all(root.path().join(".hold")).expect("mkdir");
        fs::write(root.path().join("README.md"), "not a template").expect("write");

        let templates = scan_templates(root.path()).expect("scan");
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn scanned_template_carries_options_and_digest() {
        let root = TempDir::new().expect("tempdir");
        make_template(root.path(), "acme", "ACME");

        let templates = scan_templates(root.path()).expect("scan");
        let t = &templates[0];
        assert_eq!(t.path, root.path().join("acme"));
        assert_eq!(t.options.metadata.get("name"), Some(&serde_json::json!("ACME")));
        assert_eq!(t.digest.len(), 64);
    }
}
