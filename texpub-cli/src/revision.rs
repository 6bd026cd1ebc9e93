//! Source-control revision lookup.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Short identifier of the current revision, via `git rev-parse --short HEAD`.
pub fn current(dir: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .current_dir(dir)
        .output()
        .context("failed to invoke git; pass --revision to skip the lookup")?;
    if !output.status.success() {
        bail!(
            "git rev-parse failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let sha = String::from_utf8(output.stdout)
        .context("git rev-parse produced non-UTF-8 output")?
        .trim()
        .to_owned();
    if sha.is_empty() {
        bail!("git rev-parse returned an empty revision");
    }
    Ok(sha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn resolves_short_sha_in_a_repository() {
        if Command::new("git").arg("--version").output().is_err() {
            return; // no git on this machine
        }
        let repo = TempDir::new().expect("tempdir");
        assert!(git(repo.path(), &["init", "-q"]));
        assert!(git(repo.path(), &["config", "user.email", "ci@example.com"]));
        assert!(git(repo.path(), &["config", "user.name", "ci"]));
        std::fs::write(repo.path().join("file"), "x").expect("write");
        assert!(git(repo.path(), &["add", "file"]));
        assert!(git(repo.path(), &["commit", "-q", "-m", "initial"]));

        let sha = current(repo.path()).expect("revision");
        assert!(!sha.is_empty());
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fails_outside_a_repository() {
        if Command::new("git").arg("--version").output().is_err() {
            return;
        }
        let dir = TempDir::new().expect("tempdir");
        assert!(current(dir.path()).is_err());
    }
}
