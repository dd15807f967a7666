//! Integration tests for the git adapter against scratch repositories.
//!
//! These use the real system `git` binary, which is also what the adapter
//! wraps in production.

use std::path::Path;
use std::process::Command;

use ai_gcm::error::GitError;
use ai_gcm::git::{COMMIT_SUCCESS_MESSAGE, GitCli};

/// Run a git command in a scratch repo, panicking on failure.
fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {args:?}: {e}"));
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Create a scratch repository with test identity configured.
fn init_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp directory");
    git(dir.path(), &["init"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    dir
}

#[test]
fn test_read_changes_on_fresh_repo_is_empty() {
    let dir = init_repo();
    let changes = GitCli::at(dir.path()).read_changes().unwrap();
    assert!(changes.staged.is_empty());
    assert!(changes.unstaged.is_empty());
}

#[test]
fn test_read_changes_separates_staged_and_unstaged() {
    let dir = init_repo();
    let repo = dir.path();

    // Commit a tracked file, then modify it (unstaged)
    std::fs::write(repo.join("file.txt"), "original\n").unwrap();
    git(repo, &["add", "file.txt"]);
    git(repo, &["commit", "-m", "init"]);
    std::fs::write(repo.join("file.txt"), "modified\n").unwrap();

    let adapter = GitCli::at(repo);
    let changes = adapter.read_changes().unwrap();
    assert!(changes.staged.is_empty());
    assert!(changes.unstaged.contains("-original"));
    assert!(changes.unstaged.contains("+modified"));

    // Staging moves the diff to the other side
    adapter.stage_all().unwrap();
    let changes = adapter.read_changes().unwrap();
    assert!(changes.staged.contains("+modified"));
    assert!(changes.unstaged.is_empty());
}

#[test]
fn test_read_changes_trims_surrounding_whitespace() {
    let dir = init_repo();
    let repo = dir.path();

    std::fs::write(repo.join("a.txt"), "content\n").unwrap();
    git(repo, &["add", "a.txt"]);

    let changes = GitCli::at(repo).read_changes().unwrap();
    assert_eq!(changes.staged, changes.staged.trim());
    assert!(!changes.staged.is_empty());
}

#[test]
fn test_status_short_lists_pending_files() {
    let dir = init_repo();
    let repo = dir.path();

    std::fs::write(repo.join("new.txt"), "hello\n").unwrap();

    let status = GitCli::at(repo).status_short();
    assert!(status.contains("?? new.txt"));
}

#[test]
fn test_stage_all_stages_untracked_files() {
    let dir = init_repo();
    let repo = dir.path();

    std::fs::write(repo.join("new.txt"), "hello\n").unwrap();
    GitCli::at(repo).stage_all().unwrap();

    let status = git(repo, &["status", "--short"]);
    assert!(status.contains("A  new.txt"));
}

#[test]
fn test_commit_creates_commit_with_exact_message() {
    let dir = init_repo();
    let repo = dir.path();

    std::fs::write(repo.join("hello.py"), "print('hi')\n").unwrap();
    let adapter = GitCli::at(repo);
    adapter.stage_all().unwrap();

    let detail = adapter.commit("feat: add hello print statement").unwrap();
    assert_eq!(detail, COMMIT_SUCCESS_MESSAGE);

    let subject = git(repo, &["log", "-1", "--format=%s"]);
    assert_eq!(subject.trim(), "feat: add hello print statement");
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let dir = init_repo();
    let repo = dir.path();

    // One commit so the repo is not empty, then nothing staged
    std::fs::write(repo.join("a.txt"), "a\n").unwrap();
    git(repo, &["add", "a.txt"]);
    git(repo, &["commit", "-m", "init"]);

    let result = GitCli::at(repo).commit("feat: nothing to do");
    assert!(result.is_err());
}

#[test]
fn test_read_changes_outside_repository_carries_git_error_text() {
    let dir = tempfile::tempdir().unwrap();
    let result = GitCli::at(dir.path()).read_changes();
    match result {
        Err(GitError::NonZeroExit { stderr, .. }) => {
            assert!(stderr.contains("not a git repository"));
        }
        other => panic!("Expected NonZeroExit, got: {other:?}"),
    }
}
