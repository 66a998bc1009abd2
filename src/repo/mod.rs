// ABOUTME: Git collaborator for checkout maintenance.
// ABOUTME: Synchronous git subprocess wrappers - pull, rollback, and version description.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("failed to spawn git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("`git {args}` failed with exit code {code}: {stderr}")]
    Git {
        args: String,
        code: i32,
        stderr: String,
    },
}

/// Rewinds a checkout by a number of commits.
///
/// The seam the rollback workflow drives; test doubles record whether
/// they were invoked at all.
pub trait Rollback {
    fn rollback(&self, commits: u32) -> Result<(), RepoError>;
}

/// A git checkout on disk.
#[derive(Debug, Clone)]
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_repo(&self) -> bool {
        self.dir.join(".git").exists()
    }

    /// Update the checkout from its upstream.
    pub fn pull(&self) -> Result<(), RepoError> {
        tracing::info!("updating checkout {}", self.dir.display());
        self.run(&["pull"])?;
        Ok(())
    }

    /// Short description of the locally checked-out version, `-` when the
    /// directory is not a repository or git fails.
    pub fn describe_local(&self) -> String {
        if !self.is_repo() {
            return "-".to_string();
        }
        self.run(&["describe", "HEAD", "--always", "--tags"])
            .map(|out| short_describe(&out))
            .unwrap_or_else(|_| "-".to_string())
    }

    /// Short description of the upstream version for the current branch,
    /// `-` when unavailable.
    pub fn describe_remote(&self) -> String {
        if !self.is_repo() {
            return "-".to_string();
        }
        let branch = match self.run(&["rev-parse", "--abbrev-ref", "HEAD"]) {
            Ok(b) => b.trim().to_string(),
            Err(_) => return "-".to_string(),
        };
        self.run(&["describe", &format!("origin/{branch}"), "--always", "--tags"])
            .map(|out| short_describe(&out))
            .unwrap_or_else(|_| "-".to_string())
    }

    /// `<org>/<name>` derived from the origin URL, `-` when unavailable.
    pub fn remote_name(&self) -> String {
        if !self.is_repo() {
            return "-".to_string();
        }
        self.run(&["config", "--get", "remote.origin.url"])
            .map(|out| org_and_name(out.trim()))
            .unwrap_or_else(|_| "-".to_string())
    }

    fn run(&self, args: &[&str]) -> Result<String, RepoError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.dir)
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(RepoError::Git {
                args: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Rollback for GitRepo {
    /// `git reset --hard HEAD~<commits>`.
    fn rollback(&self, commits: u32) -> Result<(), RepoError> {
        tracing::info!(
            "rolling back {} by {commits} commit(s)",
            self.dir.display()
        );
        self.run(&["reset", "--hard", &format!("HEAD~{commits}")])?;
        Ok(())
    }
}

/// Trim a `git describe` line to its tag and commit-count fields,
/// dropping the trailing abbreviated hash.
fn short_describe(raw: &str) -> String {
    raw.trim().splitn(3, '-').take(2).collect::<Vec<_>>().join("-")
}

/// Last two path segments of a remote URL, without a `.git` suffix.
fn org_and_name(url: &str) -> String {
    let trimmed = url.trim_end_matches('/').trim_end_matches(".git");
    let mut segments: Vec<&str> = trimmed.rsplit('/').take(2).collect();
    segments.reverse();
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_describe_keeps_tag_and_count() {
        assert_eq!(short_describe("v0.12.0-114-g1abcdef\n"), "v0.12.0-114");
        assert_eq!(short_describe("v0.12.0\n"), "v0.12.0");
        assert_eq!(short_describe("1abcdef\n"), "1abcdef");
    }

    #[test]
    fn org_and_name_handles_common_remote_urls() {
        assert_eq!(
            org_and_name("https://github.com/Klipper3d/klipper.git"),
            "Klipper3d/klipper"
        );
        assert_eq!(
            org_and_name("https://github.com/Arksine/moonraker"),
            "Arksine/moonraker"
        );
    }

    #[test]
    fn non_repo_directory_describes_as_dash() {
        let dir = tempfile::tempdir().unwrap();
        let repo = GitRepo::new(dir.path());
        assert_eq!(repo.describe_local(), "-");
        assert_eq!(repo.describe_remote(), "-");
        assert_eq!(repo.remote_name(), "-");
    }
}
