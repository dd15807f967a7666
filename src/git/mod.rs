//! Git adapter: the five subprocess invocations the tool depends on.
//!
//! All operations shell out to the system `git` binary, inheriting the
//! user's existing git config, hooks, and identity. The external interface
//! is exactly `diff`, `diff --cached`, `status --short`, `add -A`, and
//! `commit -m`.

use std::path::PathBuf;
use std::process::Command;

use crate::error::GitError;

/// Fixed confirmation text returned by a successful commit.
pub const COMMIT_SUCCESS_MESSAGE: &str = "Changes committed successfully!";

/// Staged and unstaged diffs of the working repository.
///
/// Produced fresh on every read; stale the instant the repository changes.
#[derive(Debug, Clone)]
pub struct GitChanges {
    pub staged: String,
    pub unstaged: String,
}

/// Adapter over the system `git` binary, rooted at a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Adapter operating in the process's current directory.
    pub fn new() -> Self {
        Self { workdir: None }
    }

    /// Adapter rooted at an explicit directory (used by tests on scratch repos).
    pub fn at(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }

    /// Read both the unstaged and staged diffs, trimmed.
    ///
    /// Fails with the external tool's error text if either invocation exits
    /// non-zero or cannot be launched (e.g. not inside a repository).
    pub fn read_changes(&self) -> Result<GitChanges, GitError> {
        let unstaged = self.run_git(&["diff"], "diff")?;
        let staged = self.run_git(&["diff", "--cached"], "diff --cached")?;

        Ok(GitChanges {
            staged: staged.trim().to_string(),
            unstaged: unstaged.trim().to_string(),
        })
    }

    /// Short-format status listing.
    ///
    /// Failures degrade into the returned string rather than an error value;
    /// the caller displays whatever comes back.
    pub fn status_short(&self) -> String {
        match self.run_git(&["status", "--short"], "status") {
            Ok(output) => output,
            Err(e) => e.to_string(),
        }
    }

    /// Stage every change (`git add -A`).
    pub fn stage_all(&self) -> Result<(), GitError> {
        self.run_git(&["add", "-A"], "add")?;
        Ok(())
    }

    /// Create a commit with the given message.
    ///
    /// Ok carries a fixed confirmation string; Err carries the external
    /// error text.
    pub fn commit(&self, message: &str) -> Result<String, GitError> {
        self.run_git(&["commit", "-m", message], "commit")?;
        Ok(COMMIT_SUCCESS_MESSAGE.to_string())
    }

    /// Run a git command and return its stdout, or a descriptive error.
    fn run_git(&self, args: &[&str], operation: &'static str) -> Result<String, GitError> {
        let mut cmd = Command::new("git");
        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn { operation, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit { operation, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_git_version_succeeds() {
        // git --version works outside any repository
        let git = GitCli::new();
        let result = git.run_git(&["--version"], "version check");
        assert!(result.is_ok());
        assert!(result.unwrap().contains("git version"));
    }

    #[test]
    fn test_run_git_invalid_command_fails_with_stderr() {
        let git = GitCli::new();
        let result = git.run_git(&["not-a-real-command"], "invalid");
        match result {
            Err(GitError::NonZeroExit { stderr, .. }) => {
                assert!(!stderr.is_empty());
            }
            other => panic!("Expected NonZeroExit, got: {:?}", other),
        }
    }

    #[test]
    fn test_read_changes_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::at(dir.path());
        let result = git.read_changes();
        assert!(matches!(result, Err(GitError::NonZeroExit { .. })));
    }

    #[test]
    fn test_status_short_outside_repository_degrades_to_text() {
        // Status swallows failures into a displayable string by design
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::at(dir.path());
        let status = git.status_short();
        assert!(status.contains("not a git repository"));
    }
}
