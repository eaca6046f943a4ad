//! Stockroom CLI

use std::process::ExitCode;

use tracing::error;

use crate::config::CliConfig;

mod commands;
mod config;
mod observability;
mod render;

/// Stockroom CLI entry point
#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    if let Err(init_error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{init_error}");
        }

        return ExitCode::FAILURE;
    }

    match commands::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(command_error) => {
            error!(error = %command_error, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "the failure message is the command's user-facing output"
            )]
            {
                eprintln!("error: {command_error}");
            }

            ExitCode::FAILURE
        }
    }
}
