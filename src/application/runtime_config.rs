use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

const SECONDS_PER_MINUTE: u64 = 60;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval: Duration,
    pub log_file: PathBuf,
    pub cycles: Option<usize>,
}

impl TryFrom<Cli> for RuntimeConfig {
    type Error = clap::Error;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let minutes = cli.interval_minutes()?;
        Ok(Self {
            source: cli.source_path,
            replica: cli.replica_path,
            interval: Duration::from_secs(minutes.saturating_mul(SECONDS_PER_MINUTE)),
            log_file: cli.log_file,
            cycles: cli.cycles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_interval_is_in_minutes() {
        let cli = Cli::try_parse_from(["mirrorsync", "src", "dst", "3", "sync.log"]).unwrap();

        let config = RuntimeConfig::try_from(cli).unwrap();

        assert_eq!(config.interval, Duration::from_secs(180));
        assert_eq!(config.source, PathBuf::from("src"));
        assert_eq!(config.replica, PathBuf::from("dst"));
    }

    #[test]
    fn test_non_numeric_interval_is_rejected() {
        let cli = Cli::try_parse_from(["mirrorsync", "src", "dst", "soon", "sync.log"]).unwrap();

        let err = RuntimeConfig::try_from(cli).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
