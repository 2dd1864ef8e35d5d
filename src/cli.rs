//! Command-line surface.
//!
//! clap's own help and version flags are disabled; the tool prints its own
//! text and also accepts the single-dash spellings `-help` and `-version`.

use crate::config::Config;
use crate::constants::TOOL_NAME;
use clap::Parser;
use std::ffi::OsString;

#[derive(Debug, Parser)]
#[command(name = TOOL_NAME, disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Print usage information
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Print the version and build information
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Only print errors and the final result
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Echo each step and git command to stderr
    #[arg(long)]
    pub verbose: bool,

    /// Branch to swoop to
    #[arg(value_name = "BRANCH")]
    pub branches: Vec<String>,
}

/// What the tool was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Swoop { branch: String },
    /// Anything other than exactly one branch name.
    Usage,
}

impl Cli {
    /// Parses arguments after rewriting single-dash long flags.
    pub fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Help and version flags win over positional arguments.
    #[must_use]
    pub fn invocation(&self) -> Invocation {
        if self.help {
            return Invocation::Help;
        }
        if self.version {
            return Invocation::Version;
        }
        match self.branches.as_slice() {
            [branch] => Invocation::Swoop {
                branch: branch.clone(),
            },
            _ => Invocation::Usage,
        }
    }

    #[must_use]
    pub fn config(&self) -> Config {
        Config::new(self.quiet, self.verbose)
    }
}

/// Rewrites `-help` and `-version` to their double-dash forms. Arguments
/// after a `--` separator are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            if arg == "--" {
                after_separator = true;
                arg
            } else if arg == "-help" {
                OsString::from("--help")
            } else if arg == "-version" {
                OsString::from("--version")
            } else {
                arg
            }
        })
        .collect()
}
