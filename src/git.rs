//! Git command wrappers.
//!
//! This module provides a thin wrapper around git CLI commands,
//! handling command execution and error formatting. The [`VersionControl`]
//! trait is the seam the swoop workflow talks to; [`GitClient`] backs it
//! with the real `git` binary.

use crate::constants::git_binary;
use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Callback invoked with the arguments of every git command before it runs.
pub type GitLogger = fn(&[&str]);

/// Echoes git commands to stderr.
pub fn verbose_logger(args: &[&str]) {
    eprintln!("  {} {}", "$ git".dimmed(), args.join(" ").dimmed());
}

pub fn no_op_logger(_args: &[&str]) {}

/// Result of a git command whose output is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    /// stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

fn spawn_git(repo: &Path, args: &[&str]) -> anyhow::Result<Output> {
    Command::new(git_binary())
        .current_dir(repo)
        .args(args)
        .output()
        .with_context(|| format!("Failed to spawn git command: git {}", args.join(" ")))
}

pub fn run_git(repo: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = spawn_git(repo, args)?;

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout);
        Ok(result.as_ref().trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim())
    }
}

/// Runs git and keeps everything it printed, regardless of exit status.
pub fn run_git_combined(repo: &Path, args: &[&str]) -> anyhow::Result<CommandOutput> {
    let output = spawn_git(repo, args)?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(CommandOutput {
        success: output.status.success(),
        output: combined,
    })
}

pub fn validate_branch_name(branch: &str) -> anyhow::Result<()> {
    if branch.is_empty() || branch.contains('\0') || branch.contains('\n') {
        anyhow::bail!("Invalid branch name: {:?}", branch);
    }
    if branch.starts_with('-') {
        anyhow::bail!("Invalid branch name {:?}: must not start with '-'", branch);
    }
    Ok(())
}

pub fn is_inside_work_tree(repo: &Path, logger: GitLogger) -> bool {
    let args = ["rev-parse", "--is-inside-work-tree"];
    logger(&args);
    matches!(run_git(repo, &args).as_deref(), Ok("true"))
}

pub fn get_current_branch(repo: &Path, logger: GitLogger) -> anyhow::Result<String> {
    let args = ["rev-parse", "--abbrev-ref", "HEAD"];
    logger(&args);
    run_git(repo, &args).context("Failed to get current branch")
}

pub fn get_current_commit(repo: &Path, logger: GitLogger) -> anyhow::Result<String> {
    let args = ["rev-parse", "HEAD"];
    logger(&args);
    run_git(repo, &args).context("Failed to get current commit")
}

pub fn checkout(repo: &Path, rev: &str, logger: GitLogger) -> anyhow::Result<CommandOutput> {
    validate_branch_name(rev)?;
    // trailing `--` keeps git from falling back to restoring a path named `rev`
    let args = ["checkout", rev, "--"];
    logger(&args);
    run_git_combined(repo, &args).with_context(|| format!("Failed to checkout '{}'", rev))
}

pub fn pull(repo: &Path, logger: GitLogger) -> anyhow::Result<CommandOutput> {
    let args = ["pull"];
    logger(&args);
    run_git_combined(repo, &args).context("Failed to pull from remote")
}

/// The version-control operations a swoop needs.
pub trait VersionControl {
    /// Whether the working directory is inside a work tree.
    fn is_repository(&self) -> bool;

    /// Name of the checked-out branch, or `HEAD` when detached.
    fn current_branch(&self) -> anyhow::Result<String>;

    /// Full SHA of the checked-out commit.
    fn current_commit(&self) -> anyhow::Result<String>;

    /// Switches the working tree to `rev`.
    fn checkout(&self, rev: &str) -> anyhow::Result<CommandOutput>;

    /// Updates the checked-out branch from its upstream.
    fn pull(&self) -> anyhow::Result<CommandOutput>;
}

/// [`VersionControl`] backed by the git CLI, run inside `repo`.
#[derive(Debug, Clone)]
pub struct GitClient {
    repo: PathBuf,
    logger: GitLogger,
}

impl GitClient {
    pub fn new(repo: impl Into<PathBuf>, logger: GitLogger) -> Self {
        Self {
            repo: repo.into(),
            logger,
        }
    }

    pub fn path(&self) -> &Path {
        &self.repo
    }
}

impl VersionControl for GitClient {
    fn is_repository(&self) -> bool {
        is_inside_work_tree(&self.repo, self.logger)
    }

    fn current_branch(&self) -> anyhow::Result<String> {
        get_current_branch(&self.repo, self.logger)
    }

    fn current_commit(&self) -> anyhow::Result<String> {
        get_current_commit(&self.repo, self.logger)
    }

    fn checkout(&self, rev: &str) -> anyhow::Result<CommandOutput> {
        checkout(&self.repo, rev, self.logger)
    }

    fn pull(&self) -> anyhow::Result<CommandOutput> {
        pull(&self.repo, self.logger)
    }
}
