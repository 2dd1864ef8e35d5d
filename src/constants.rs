//! Application-wide constants.
//!
//! Centralized configuration values to avoid magic strings throughout the codebase.

/// Name the tool reports itself as in help and version output.
pub const TOOL_NAME: &str = "git-swoop";

/// Project home, referenced from the version notice.
pub const PROJECT_URL: &str = "https://github.com/ammuench/git-swoop";

/// Default git executable.
const DEFAULT_GIT_BINARY: &str = "git";

/// Returns the git executable to invoke.
///
/// Can be customized via the GIT_SWOOP_GIT environment variable.
/// Falls back to `git` (resolved through `PATH`) if not set or empty.
///
/// Example: `GIT_SWOOP_GIT=/opt/git/bin/git git-swoop develop`
pub fn git_binary() -> String {
    std::env::var("GIT_SWOOP_GIT")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GIT_BINARY.to_string())
}

/// Tool version. A `GIT_SWOOP_VERSION` set at build time wins over the crate version.
pub const VERSION: &str = match option_env!("GIT_SWOOP_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Compiler the binary was built with, captured by the build script.
pub const RUSTC_VERSION: &str = env!("GIT_SWOOP_RUSTC_VERSION");

/// Progress spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;

/// Number of characters of a commit SHA shown for a detached HEAD.
pub const SHORT_SHA_LEN: usize = 7;

/// What `git rev-parse --abbrev-ref HEAD` prints when HEAD is detached.
pub const DETACHED_HEAD: &str = "HEAD";

/// Exit code for usage errors and failed swoops.
pub const EXIT_FAILURE: u8 = 1;
