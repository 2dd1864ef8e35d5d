//! Runtime settings resolved from the command line.

use crate::git::{self, GitLogger};

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub verbosity: Verbosity,
}

impl Config {
    /// `--quiet` takes precedence; clap already rejects the two together.
    #[must_use]
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let verbosity = match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        };
        Self { verbosity }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Only `--verbose` echoes git commands.
    #[must_use]
    pub fn git_logger(&self) -> GitLogger {
        if self.is_verbose() {
            git::verbose_logger
        } else {
            git::no_op_logger
        }
    }
}

/// How much a swoop prints besides its final report.
///
/// Quiet drops the spinner and successful pull output, Verbose swaps the
/// spinner for a stderr trace of steps and git commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}
