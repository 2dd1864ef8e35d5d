//! The swoop workflow: check out a branch, pull it, and return.
//!
//! Each step is a blocking git invocation whose outcome is classified before
//! the next one starts. Once the original HEAD is known, every failure path
//! leaves the repository on a head the result can name.

use crate::constants::{DETACHED_HEAD, SHORT_SHA_LEN};
use crate::git::{self, CommandOutput, VersionControl};
use std::fmt;
use std::time::{Duration, Instant};

/// Where the repository was before the swoop began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginalHead {
    Branch(String),
    /// HEAD was detached; holds the full commit SHA.
    DetachedAt(String),
}

impl OriginalHead {
    #[must_use]
    pub fn is_detached(&self) -> bool {
        matches!(self, OriginalHead::DetachedAt(_))
    }

    /// The revision to hand to `git checkout` to get back here.
    #[must_use]
    pub fn rev(&self) -> &str {
        match self {
            OriginalHead::Branch(name) => name,
            OriginalHead::DetachedAt(sha) => sha,
        }
    }
}

impl fmt::Display for OriginalHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginalHead::Branch(name) => f.write_str(name),
            OriginalHead::DetachedAt(sha) => {
                f.write_str(sha.get(..SHORT_SHA_LEN).unwrap_or(sha))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    CheckedOut,
    Synced,
    Returned,
    Failed,
}

impl Phase {
    /// Phases only move forward along the success path, or into `Failed`.
    #[must_use]
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::NotStarted, Phase::CheckedOut)
                | (Phase::CheckedOut, Phase::Synced)
                | (Phase::Synced, Phase::Returned)
                | (Phase::NotStarted | Phase::CheckedOut | Phase::Synced, Phase::Failed)
        )
    }
}

/// State of a single swoop run. Lives for one invocation only.
#[derive(Debug, Clone)]
pub struct SwoopSession {
    target: String,
    original: Option<OriginalHead>,
    phase: Phase,
}

impl SwoopSession {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            original: None,
            phase: Phase::NotStarted,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn original(&self) -> Option<&OriginalHead> {
        self.original.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Records the original head. Only the first capture sticks.
    pub fn capture_original(&mut self, head: OriginalHead) {
        if self.original.is_none() {
            self.original = Some(head);
        }
    }

    /// Moves to `next` if that is a legal transition; returns whether it moved.
    pub fn advance(&mut self, next: Phase) -> bool {
        if self.phase.can_advance_to(next) {
            self.phase = next;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwoopStep {
    Started,
    VerifyingRepository,
    DetectingBranch,
    CheckingOut { branch: String },
    Pulling { branch: String },
    RollingBack { branch: String },
    Returning { branch: String },
    Completed,
}

impl fmt::Display for SwoopStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwoopStep::Started => write!(f, "Starting swoop"),
            SwoopStep::VerifyingRepository => write!(f, "Verifying git repository"),
            SwoopStep::DetectingBranch => write!(f, "Detecting current branch"),
            SwoopStep::CheckingOut { branch } => write!(f, "Checking out `{}`", branch),
            SwoopStep::Pulling { branch } => write!(f, "Pulling `{}` from remote", branch),
            SwoopStep::RollingBack { branch } => write!(f, "Rolling back to `{}`", branch),
            SwoopStep::Returning { branch } => write!(f, "Returning to `{}`", branch),
            SwoopStep::Completed => write!(f, "Completed"),
        }
    }
}

/// Receives progress notifications while a swoop runs.
pub trait SwoopCallbacks {
    fn on_step(&self, step: &SwoopStep);

    fn on_complete(&self, _result: &SwoopResult) {}
}

/// Null object for [`SwoopCallbacks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpCallbacks;

impl SwoopCallbacks for NoOpCallbacks {
    fn on_step(&self, _step: &SwoopStep) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwoopSuccess {
    pub original: OriginalHead,
    pub target: String,
    pub pull_output: String,
}

/// Outcome of the compensating checkout after a failed pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rollback {
    Restored,
    Failed { output: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwoopFailure {
    /// The branch name could never be a valid checkout target. Nothing was checked out.
    InvalidBranch { target: String, error: String },
    NotARepository,
    BranchUnknown { error: String },
    /// The target checkout failed; the working tree did not move.
    CheckoutFailed {
        target: String,
        original: OriginalHead,
        output: String,
    },
    PullFailed {
        target: String,
        original: OriginalHead,
        output: String,
        rollback: Rollback,
    },
    /// Pull succeeded but the final checkout did not.
    ReturnFailed {
        target: String,
        original: OriginalHead,
        output: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwoopOutcome {
    Success(SwoopSuccess),
    Failed(SwoopFailure),
}

#[derive(Debug, Clone)]
pub struct SwoopResult {
    pub target: String,
    /// Captured once the current branch was read; `None` if the run stopped earlier.
    pub original: Option<OriginalHead>,
    pub outcome: SwoopOutcome,
    pub phase: Phase,
    pub duration: Duration,
}

impl SwoopResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SwoopOutcome::Success(_))
    }

    /// The revision the repository is left on, when the run got far enough to know it.
    #[must_use]
    pub fn final_head(&self) -> Option<&str> {
        match &self.outcome {
            SwoopOutcome::Success(success) => Some(success.original.rev()),
            SwoopOutcome::Failed(failure) => match failure {
                SwoopFailure::InvalidBranch { .. }
                | SwoopFailure::NotARepository
                | SwoopFailure::BranchUnknown { .. } => None,
                SwoopFailure::CheckoutFailed { original, .. }
                | SwoopFailure::PullFailed {
                    original,
                    rollback: Rollback::Restored,
                    ..
                } => Some(original.rev()),
                SwoopFailure::PullFailed { target, .. }
                | SwoopFailure::ReturnFailed { target, .. } => Some(target.as_str()),
            },
        }
    }
}

/// Runs a swoop of `target` against `vcs`.
pub fn swoop<V, C>(vcs: &V, target: &str, callbacks: &C) -> SwoopResult
where
    V: VersionControl + ?Sized,
    C: SwoopCallbacks + ?Sized,
{
    let start = Instant::now();
    let mut session = SwoopSession::new(target);

    let outcome = match do_swoop(vcs, &mut session, callbacks) {
        Ok(success) => SwoopOutcome::Success(success),
        Err(failure) => {
            session.advance(Phase::Failed);
            SwoopOutcome::Failed(failure)
        }
    };

    let result = SwoopResult {
        target: session.target().to_string(),
        original: session.original().cloned(),
        outcome,
        phase: session.phase(),
        duration: start.elapsed(),
    };
    callbacks.on_complete(&result);
    result
}

fn do_swoop<V, C>(
    vcs: &V,
    session: &mut SwoopSession,
    callbacks: &C,
) -> Result<SwoopSuccess, SwoopFailure>
where
    V: VersionControl + ?Sized,
    C: SwoopCallbacks + ?Sized,
{
    let target = session.target().to_string();
    callbacks.on_step(&SwoopStep::Started);

    callbacks.on_step(&SwoopStep::VerifyingRepository);
    if !vcs.is_repository() {
        return Err(SwoopFailure::NotARepository);
    }

    git::validate_branch_name(&target).map_err(|e| SwoopFailure::InvalidBranch {
        target: target.clone(),
        error: format!("{e:#}"),
    })?;

    callbacks.on_step(&SwoopStep::DetectingBranch);
    let original = detect_original_head(vcs).map_err(|e| SwoopFailure::BranchUnknown {
        error: format!("{e:#}"),
    })?;
    session.capture_original(original.clone());

    callbacks.on_step(&SwoopStep::CheckingOut {
        branch: target.clone(),
    });
    if let Err(output) = attempt(vcs.checkout(&target)) {
        return Err(SwoopFailure::CheckoutFailed {
            target,
            original,
            output,
        });
    }
    session.advance(Phase::CheckedOut);

    callbacks.on_step(&SwoopStep::Pulling {
        branch: target.clone(),
    });
    let pull_output = match attempt(vcs.pull()) {
        Ok(output) => output,
        Err(output) => {
            callbacks.on_step(&SwoopStep::RollingBack {
                branch: original.to_string(),
            });
            let rollback = match attempt(vcs.checkout(original.rev())) {
                Ok(_) => Rollback::Restored,
                Err(output) => Rollback::Failed { output },
            };
            return Err(SwoopFailure::PullFailed {
                target,
                original,
                output,
                rollback,
            });
        }
    };
    session.advance(Phase::Synced);

    callbacks.on_step(&SwoopStep::Returning {
        branch: original.to_string(),
    });
    if let Err(output) = attempt(vcs.checkout(original.rev())) {
        return Err(SwoopFailure::ReturnFailed {
            target,
            original,
            output,
        });
    }
    session.advance(Phase::Returned);

    callbacks.on_step(&SwoopStep::Completed);

    Ok(SwoopSuccess {
        original,
        target,
        pull_output,
    })
}

fn detect_original_head<V>(vcs: &V) -> anyhow::Result<OriginalHead>
where
    V: VersionControl + ?Sized,
{
    let branch = vcs.current_branch()?;
    let branch = branch.trim();
    if branch == DETACHED_HEAD {
        Ok(OriginalHead::DetachedAt(vcs.current_commit()?))
    } else {
        Ok(OriginalHead::Branch(branch.to_string()))
    }
}

/// Splits a git invocation into its output on success or the text to show on failure.
fn attempt(result: anyhow::Result<CommandOutput>) -> Result<String, String> {
    match result {
        Ok(output) if output.success => Ok(output.output),
        Ok(output) => Err(output.output),
        Err(e) => Err(format!("{e:#}")),
    }
}
