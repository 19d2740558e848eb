use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::application::data::LogLevel;

/// Periodically mirrors a source directory onto a replica directory.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Source folder path
    pub source_path: PathBuf,
    /// Replica folder path
    pub replica_path: PathBuf,
    /// Minutes between two synchronizations
    // Kept as text so a wrong argument count is reported before the value
    // itself is looked at; see `interval_minutes`.
    #[clap(allow_negative_numbers = true)]
    pub interval: String,
    /// Existing file the event log is appended to
    pub log_file: PathBuf,

    /// Verbosity of the diagnostics written to stderr
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Stop after this many cycles instead of running forever
    #[clap(long, hide = true)]
    pub cycles: Option<usize>,
}

impl Cli {
    pub fn interval_minutes(&self) -> Result<u64, clap::Error> {
        self.interval.parse::<u64>().map_err(|err| {
            Self::command().error(
                ErrorKind::ValueValidation,
                format!(
                    "invalid value '{}' for '<INTERVAL>': {err}",
                    self.interval
                ),
            )
        })
    }
}

/// Parse failures caused by too few or too many positional arguments.
pub fn is_argument_count_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues
    )
}
