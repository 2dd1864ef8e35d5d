use anyhow::Context;
use git_swoop::cli::{Cli, Invocation};
use git_swoop::constants::EXIT_FAILURE;
use git_swoop::git::GitClient;
use git_swoop::{output, swoop};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    let config = cli.config();

    let branch = match cli.invocation() {
        Invocation::Help => {
            output::print_help();
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Version => {
            output::print_version();
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Usage => {
            output::print_usage_error();
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
        Invocation::Swoop { branch } => branch,
    };

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let client = GitClient::new(cwd, config.git_logger());
    output::print_working_dir(client.path(), &config);

    let progress = output::create_swoop_progress(&config);
    let result = swoop::swoop(&client, &branch, &progress);
    progress.finish();

    output::print_report(&result, &config);

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAILURE))
    }
}
