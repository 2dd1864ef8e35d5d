//! Git branch swooping library.
//!
//! This crate provides functionality to refresh another branch without
//! leaving the one you are on:
//! - Verifying the working directory is a git repository
//! - Recording the current branch (or detached commit)
//! - Checking out the target branch
//! - Pulling it from its remote
//! - Returning to the original branch, rolling back if the pull fails

pub mod cli;
pub mod config;
pub mod constants;
pub mod git;
pub mod output;
pub mod swoop;
