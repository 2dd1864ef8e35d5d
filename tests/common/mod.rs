//! Test infrastructure for git-swoop integration tests.
#![allow(dead_code)]

use anyhow::Result;
use git_swoop::git::run_git;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary git repository for testing.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    temp_dir: TempDir,
    path: PathBuf,
    remote: Option<PathBuf>,
}

impl TestRepo {
    /// Creates a new test repository with an initial commit on `main`.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("local");
        std::fs::create_dir_all(&path)?;

        init_with_identity(&path)?;
        std::fs::write(path.join("README.md"), "# Test Repo\n")?;
        run_git(&path, &["add", "README.md"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            temp_dir,
            path,
            remote: None,
        })
    }

    /// Creates a test repository whose `main` tracks a bare `origin`.
    pub fn with_remote() -> Result<Self> {
        let mut repo = Self::new()?;
        let remote = repo.temp_dir.path().join("remote.git");
        std::fs::create_dir_all(&remote)?;
        run_git(&remote, &["init", "--bare", "-b", "main"])?;

        run_git(&repo.path, &["remote", "add", "origin", path_str(&remote)])?;
        run_git(&repo.path, &["push", "-u", "origin", "main"])?;
        repo.remote = Some(remote);
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_branch(&self) -> Result<String> {
        run_git(&self.path, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn rev_parse(&self, rev: &str) -> Result<String> {
        run_git(&self.path, &["rev-parse", rev])
    }

    /// Creates a local branch without switching to it.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        run_git(&self.path, &["branch", name])?;
        Ok(())
    }

    /// Creates a branch and pushes it to `origin` with upstream tracking.
    pub fn publish_branch(&self, name: &str) -> Result<()> {
        self.create_branch(name)?;
        run_git(&self.path, &["push", "-u", "origin", name])?;
        Ok(())
    }

    /// Commits a new file on `branch` from a separate clone and pushes it,
    /// so the local repository falls behind. Returns the new commit.
    pub fn push_upstream_commit(&self, branch: &str, file: &str) -> Result<String> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("test repo has no remote"))?;
        let clone_dir = TempDir::new()?;
        let clone = clone_dir.path().join("clone");
        run_git(
            clone_dir.path(),
            &["clone", path_str(remote), path_str(&clone)],
        )?;
        run_git(&clone, &["config", "user.email", "upstream@example.com"])?;
        run_git(&clone, &["config", "user.name", "Upstream User"])?;

        let has_branch = run_git(&clone, &["ls-remote", "--heads", "origin", branch])?;
        if has_branch.is_empty() {
            run_git(&clone, &["checkout", "-b", branch])?;
        } else {
            run_git(&clone, &["checkout", branch])?;
        }
        std::fs::write(clone.join(file), format!("{}\n", file))?;
        run_git(&clone, &["add", file])?;
        run_git(&clone, &["commit", "-m", format!("Add {}", file).as_str()])?;
        run_git(&clone, &["push", "origin", branch])?;
        run_git(&clone, &["rev-parse", "HEAD"])
    }

    /// Commits a new file on `branch` locally, then returns to the previous branch.
    pub fn commit_on_branch(&self, branch: &str, file: &str) -> Result<()> {
        let current = self.current_branch()?;
        run_git(&self.path, &["checkout", branch])?;
        std::fs::write(self.path.join(file), format!("{}\n", file))?;
        run_git(&self.path, &["add", file])?;
        run_git(&self.path, &["commit", "-m", format!("Add {}", file).as_str()])?;
        run_git(&self.path, &["checkout", current.as_str()])?;
        Ok(())
    }

    pub fn fetch(&self) -> Result<()> {
        run_git(&self.path, &["fetch", "origin"])?;
        Ok(())
    }

    pub fn config(&self, key: &str, value: &str) -> Result<()> {
        run_git(&self.path, &["config", key, value])?;
        Ok(())
    }

    pub fn detach_head(&self) -> Result<()> {
        run_git(&self.path, &["checkout", "--detach", "HEAD"])?;
        Ok(())
    }
}

/// A temporary directory that is not a git repository.
pub fn plain_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

fn init_with_identity(path: &Path) -> Result<()> {
    run_git(path, &["init", "-b", "main"])?;
    run_git(path, &["config", "user.email", "test@example.com"])?;
    run_git(path, &["config", "user.name", "Test User"])?;
    Ok(())
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are valid UTF-8")
}
