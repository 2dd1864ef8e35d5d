//! Spinner, colored output, and report formatting.
//!
//! Reports, raw git output and help/version text go to stdout. The spinner
//! and verbose step echo go to stderr.

use crate::config::Config;
use crate::constants::{PROGRESS_TICK_MS, PROJECT_URL, RUSTC_VERSION, TOOL_NAME, VERSION};
use crate::swoop::{
    OriginalHead, Rollback, SwoopCallbacks, SwoopFailure, SwoopOutcome, SwoopResult, SwoopStep,
};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner plus verbose step echo for a swoop run.
/// Uses `Option` to avoid allocation when progress is hidden (quiet/verbose modes).
pub struct SwoopProgress {
    spinner: Option<ProgressBar>,
    config: Config,
}

impl SwoopProgress {
    /// Clears the spinner so the report prints on a clean line.
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

impl SwoopCallbacks for SwoopProgress {
    fn on_step(&self, step: &SwoopStep) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("{}...", step));
        }
        print_step(&self.config, step);
    }

    fn on_complete(&self, result: &SwoopResult) {
        if self.config.is_verbose() {
            eprintln!(
                "  {} in {}",
                if result.is_success() {
                    "✓ finished".green()
                } else {
                    "✗ failed".red()
                },
                format_duration(result.duration).dimmed()
            );
        }
    }
}

/// Creates the progress display for a swoop.
/// The spinner only exists in normal mode.
#[must_use]
pub fn create_swoop_progress(config: &Config) -> SwoopProgress {
    let spinner = if config.is_quiet() || config.is_verbose() {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Some(spinner)
    };

    SwoopProgress {
        spinner,
        config: *config,
    }
}

/// Prints a step progress message in verbose mode.
pub fn print_step(config: &Config, step: &SwoopStep) {
    if !config.is_verbose() {
        return;
    }
    eprintln!("  {}...", step.to_string().dimmed());
}

pub fn print_working_dir(path: &Path, config: &Config) {
    if !config.is_verbose() {
        return;
    }
    eprintln!(
        "{} {}",
        "Working in:".cyan(),
        path.display().to_string().white().bold()
    )
}

pub fn print_report(result: &SwoopResult, config: &Config) {
    for block in format_report(result, config) {
        println!("\n{}", block);
    }
}

pub fn print_usage_error() {
    println!("{}", "ERROR: Need a singular branch name to swoop from".red());
    print_help();
}

pub fn print_help() {
    print!("{}", help_text());
}

pub fn print_version() {
    print!("{}", version_text());
}

/// Blocks of the final report, in print order. Raw git output is kept as-is
/// apart from trailing whitespace.
#[must_use]
pub fn format_report(result: &SwoopResult, config: &Config) -> Vec<String> {
    let mut blocks = Vec::new();

    match &result.outcome {
        SwoopOutcome::Success(success) => {
            if !config.is_quiet() {
                push_raw(&mut blocks, &success.pull_output);
            }
            blocks.push(
                format!(
                    "Successfully swooped from branch `{}` and returned to {}",
                    success.target,
                    head_label(&success.original)
                )
                .green()
                .to_string(),
            );
        }
        SwoopOutcome::Failed(failure) => format_failure(&mut blocks, failure),
    }

    blocks
}

fn format_failure(blocks: &mut Vec<String>, failure: &SwoopFailure) {
    match failure {
        SwoopFailure::InvalidBranch { error, .. } => {
            blocks.push(error_line(&format!("ERROR: {}", error)));
        }
        SwoopFailure::NotARepository => {
            blocks.push(error_line("ERROR: Not in a git repository"));
        }
        SwoopFailure::BranchUnknown { error } => {
            blocks.push(error_line(&format!(
                "ERROR: Unable to determine current working branch: {}",
                error
            )));
        }
        SwoopFailure::CheckoutFailed {
            target,
            original,
            output,
        } => {
            push_raw(blocks, output);
            blocks.push(error_line(&format!(
                "ERROR: Unable to checkout swoop branch `{}`",
                target
            )));
            blocks.push(format!("Still on original {}", head_label(original)));
        }
        SwoopFailure::PullFailed {
            target,
            original,
            output,
            rollback,
        } => {
            push_raw(blocks, output);
            blocks.push(error_line(&format!(
                "ERROR: Unable to pull from swoop branch `{}`",
                target
            )));
            match rollback {
                Rollback::Restored => {
                    blocks.push(format!("Returned to original {}", head_label(original)));
                }
                Rollback::Failed { output } => {
                    push_raw(blocks, output);
                    push_stuck(blocks, target, original);
                }
            }
        }
        SwoopFailure::ReturnFailed {
            target,
            original,
            output,
        } => {
            push_raw(blocks, output);
            push_stuck(blocks, target, original);
        }
    }
}

fn push_stuck(blocks: &mut Vec<String>, target: &str, original: &OriginalHead) {
    blocks.push(error_line(&format!(
        "ERROR: Unable to return to original {}",
        head_label(original)
    )));
    blocks.push(
        format!("Still on swoop branch `{}`", target)
            .yellow()
            .to_string(),
    );
}

fn push_raw(blocks: &mut Vec<String>, output: &str) {
    let output = output.trim_end();
    if !output.is_empty() {
        blocks.push(output.to_string());
    }
}

fn error_line(message: &str) -> String {
    message.red().bold().to_string()
}

fn head_label(head: &OriginalHead) -> String {
    if head.is_detached() {
        format!("commit `{}` (detached HEAD)", head)
    } else {
        format!("branch `{}`", head)
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}

#[must_use]
pub fn help_text() -> String {
    format!(
        "
usage: {tool} [--quiet | --verbose] <target-branch-name>
   {tool} will try to checkout your target branch, pull down the latest from remote,
   and then return to where you started

flags:
   --help (alias: -h, -help): prints this message
   --version (alias: -v, -version): prints the version and basic package info
   --quiet (alias: -q): only print errors and the final result
   --verbose: echo each step and git command to stderr

",
        tool = TOOL_NAME
    )
}

#[must_use]
pub fn version_text() -> String {
    format!(
        "
{tool} {VERSION}, built with {RUSTC_VERSION}

{tool} Copyright (C) 2025 Alex Muench
This program comes with ABSOLUTELY NO WARRANTY
This is free software, and you are welcome to redistribute it
under the terms of the GNU General Public License, version 3 or later;
see `{PROJECT_URL}`
",
        tool = TOOL_NAME
    )
}
