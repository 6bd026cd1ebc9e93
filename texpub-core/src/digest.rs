//! Content digests for change detection.
//!
//! A template's digest is the SHA-256 over its files, walked in sorted
//! relative-path order, hashing `<relative path>\0<file bytes>` per file.
//! The top-level `original/` subtree is excluded: it never reaches the
//! published bundle, so edits there must not trigger reprocessing.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, ManifestError};

/// Name of the auxiliary passthrough directory excluded from bundles.
pub const ORIGINAL_DIR: &str = "original";

/// Compute the content digest of the template directory at `dir`.
pub fn digest_template(dir: &Path) -> Result<String, ManifestError> {
    let mut files = Vec::new();
    collect_files(dir, dir, &mut files)?;
    files.sort();

    let mut hasher = Sha256::new();
    for relative in files {
        let path = dir.join(&relative);
        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        // Use '/' separators so the digest is identical across platforms.
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        hasher.update(key.as_bytes());
        hasher.update([0u8]);
        hasher.update(&bytes);
    }
    Ok(hex::encode(hasher.finalize()))
}

fn collect_files(
    root: &Path,
    dir: &Path,
    out: &mut Vec<PathBuf>,
) -> Result<(), ManifestError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            if dir == root && entry.file_name() == ORIGINAL_DIR {
                continue;
            }
            collect_files(root, &path, out)?;
        } else if file_type.is_file() {
            let relative = path
                .strip_prefix(root)
                .unwrap_or(path.as_path())
                .to_path_buf();
            out.push(relative);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, contents).expect("write");
    }

    #[test]
    fn digest_is_stable_across_calls() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "template.yml", "metadata:\n  name: A\n");
        write(dir.path(), "main.tex", "\\documentclass{article}\n");

        let first = digest_template(dir.path()).expect("first");
        let second = digest_template(dir.path()).expect("second");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64, "hex-encoded sha256");
    }

    #[test]
    fn content_change_changes_digest() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "main.tex", "v1");
        let before = digest_template(dir.path()).expect("before");
        write(dir.path(), "main.tex", "v2");
        let after = digest_template(dir.path()).expect("after");
        assert_ne!(before, after);
    }

    #[test]
    fn renaming_a_file_changes_digest() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "a.tex", "same");
        let before = digest_template(dir.path()).expect("before");
        fs::rename(dir.path().join("a.tex"), dir.path().join("b.tex")).expect("rename");
        let after = digest_template(dir.path()).expect("after");
        assert_ne!(before, after);
    }

    #[test]
    fn original_directory_is_excluded() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "main.tex", "body");
        let before = digest_template(dir.path()).expect("before");

        write(dir.path(), "original/scan.pdf", "auxiliary bytes");
        let with_original = digest_template(dir.path()).expect("with original");
        assert_eq!(before, with_original, "original/ must not affect the digest");

        // A nested directory that merely contains an `original` name still counts.
        write(dir.path(), "chapters/original", "a real template file");
        let with_nested = digest_template(dir.path()).expect("nested");
        assert_ne!(before, with_nested, "only the top-level original/ is excluded");
    }

    #[test]
    fn nested_files_are_included() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "main.tex", "body");
        let before = digest_template(dir.path()).expect("before");
        write(dir.path(), "figures/logo.eps", "eps");
        let after = digest_template(dir.path()).expect("after");
        assert_ne!(before, after);
    }
}
