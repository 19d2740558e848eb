#![allow(clippy::enum_variant_names)]

use std::process::ExitCode;

use clap::Parser as _;
use tracing::debug;

use crate::{
    application::{Application, RuntimeConfig},
    cli::{Cli, is_argument_count_error},
};

mod application;
mod cli;
mod event_log;
mod ext;
mod scheduler;
mod sync;

#[compio::main]
async fn main() -> ExitCode {
    let cli_args = match Cli::try_parse() {
        Ok(cli_args) => cli_args,
        Err(err) if is_argument_count_error(err.kind()) => {
            println!("Invalid number of arguments");
            return ExitCode::FAILURE;
        }
        Err(err) => err.exit(),
    };
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");
    let config = RuntimeConfig::try_from(cli_args).unwrap_or_else(|err| err.exit());

    match Application::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_missing_log_file() => {
            println!("log_file not found");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", snafu::Report::from_error(err));
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; stdout is reserved for configuration failures.
fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
