mod common;

use common::{TestRepo, plain_dir};
use git_swoop::git::{self, GitClient, VersionControl, no_op_logger};
use std::path::PathBuf;

/// Shorthand for the test logger (no-op for tests)
fn logger() -> git::GitLogger {
    no_op_logger
}

#[test]
fn test_repo_creation() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;
    let branch = git::get_current_branch(repo.path(), logger())?;
    assert_eq!(branch, "main");
    Ok(())
}

#[test]
fn test_is_inside_work_tree() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;
    assert!(git::is_inside_work_tree(repo.path(), logger()));

    std::fs::create_dir_all(repo.path().join("nested/dir"))?;
    assert!(git::is_inside_work_tree(
        &repo.path().join("nested/dir"),
        logger()
    ));

    let outside = plain_dir()?;
    assert!(!git::is_inside_work_tree(outside.path(), logger()));
    Ok(())
}

#[test]
fn test_get_current_branch_is_trimmed() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;
    repo.create_branch("feature")?;
    git::run_git(repo.path(), &["checkout", "feature"])?;

    let branch = git::get_current_branch(repo.path(), logger())?;
    assert_eq!(branch, "feature");
    assert!(!branch.ends_with('\n'));
    Ok(())
}

#[test]
fn test_get_current_branch_reports_head_when_detached() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;
    let commit = git::get_current_commit(repo.path(), logger())?;
    repo.detach_head()?;

    assert_eq!(git::get_current_branch(repo.path(), logger())?, "HEAD");
    assert_eq!(git::get_current_commit(repo.path(), logger())?, commit);
    Ok(())
}

#[test]
fn test_checkout_switches_branch() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;
    repo.create_branch("feature")?;

    let output = git::checkout(repo.path(), "feature", logger())?;

    assert!(output.success);
    assert!(output.output.contains("feature"));
    assert_eq!(repo.current_branch()?, "feature");
    Ok(())
}

#[test]
fn test_checkout_missing_branch_captures_stderr() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;

    let output = git::checkout(repo.path(), "nonexistent-branch", logger())?;

    assert!(!output.success);
    assert!(
        output.output.contains("nonexistent-branch"),
        "Expected git's error to name the branch, got: {}",
        output.output
    );
    assert_eq!(repo.current_branch()?, "main");
    Ok(())
}

#[test]
fn test_checkout_rejects_option_like_branch() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;

    let result = git::checkout(repo.path(), "--orphan", logger());
    assert!(result.is_err());
    assert_eq!(repo.current_branch()?, "main");
    Ok(())
}

#[test]
fn test_pull_fast_forwards_from_upstream() -> anyhow::Result<()> {
    let repo = TestRepo::with_remote()?;
    let upstream = repo.push_upstream_commit("main", "upstream.txt")?;

    let output = git::pull(repo.path(), logger())?;

    assert!(output.success, "pull failed: {}", output.output);
    assert_eq!(repo.rev_parse("HEAD")?, upstream);
    Ok(())
}

#[test]
fn test_pull_fails_without_upstream() -> anyhow::Result<()> {
    let repo = TestRepo::with_remote()?;
    repo.create_branch("local-only")?;
    git::run_git(repo.path(), &["checkout", "local-only"])?;

    let output = git::pull(repo.path(), logger())?;

    assert!(!output.success);
    assert!(!output.output.trim().is_empty());
    Ok(())
}

#[test]
fn test_run_git_reports_failure_for_unknown_ref() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;

    let result = git::run_git(repo.path(), &["rev-parse", "does-not-exist"]);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_run_git_reports_spawn_failure_for_missing_repo_path() {
    let missing_path = PathBuf::from("/no/such/repo/for/test");

    let result = git::run_git(&missing_path, &["status"]);
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("Failed to spawn git command"));
}

#[test]
fn test_git_client_implements_version_control() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;
    repo.create_branch("feature")?;
    let client = GitClient::new(repo.path(), logger());

    assert!(client.is_repository());
    assert_eq!(client.current_branch()?, "main");
    assert!(client.checkout("feature")?.success);
    assert_eq!(client.current_branch()?, "feature");
    assert_eq!(client.path(), repo.path());
    Ok(())
}

#[test]
fn test_checkout_never_restores_a_path() -> anyhow::Result<()> {
    let repo = TestRepo::new()?;
    std::fs::write(repo.path().join("README.md"), "local work\n")?;

    let output = git::checkout(repo.path(), "README.md", logger())?;

    assert!(!output.success);
    assert_eq!(
        std::fs::read_to_string(repo.path().join("README.md"))?,
        "local work\n"
    );
    Ok(())
}
