use std::fs::File;
use std::path::{Path, PathBuf};

use derive_more::Display;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::event_log::{EventLog, EventLogError};
use crate::scheduler::{RuntimeSleeper, Scheduler};
use crate::sync::{SyncError, run_cycle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RootRole {
    #[display("source")]
    Source,
    #[display("replica")]
    Replica,
}

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let config: RuntimeConfig = app_config.into();
        let mut log = EventLog::open_existing(&config.log_file).context(EventLogSnafu)?;
        debug!("Appending events to {}", config.log_file.display());

        Self::verify_root(&config.source, RootRole::Source, &mut log)?;
        Self::verify_root(&config.replica, RootRole::Replica, &mut log)?;

        let outcome = Scheduler::new(config.interval, RuntimeSleeper)
            .with_cycle_limit(config.cycles)
            .run(|index| Self::cycle(&config, &mut log, index))
            .await;

        match outcome {
            Ok(completed) => {
                info!("Stopping after {} cycles", completed);
                Ok(())
            }
            Err(err) => {
                log.error(&err);
                Err(err).context(CycleSnafu)
            }
        }
    }

    fn cycle(
        config: &RuntimeConfig,
        log: &mut EventLog<File>,
        index: usize,
    ) -> Result<(), SyncError> {
        let report = run_cycle(&config.source, &config.replica, log)?;
        debug!(
            "Cycle {} made {} changes, {} entries failed",
            index + 1,
            report.mutations(),
            report.failures
        );
        Ok(())
    }

    fn verify_root(
        path: &Path,
        role: RootRole,
        log: &mut EventLog<File>,
    ) -> Result<(), ApplicationError> {
        if path.exists() {
            return Ok(());
        }

        log.error(format_args!("Error: Path {} not found", path.display()));
        log.error(format_args!("Please enter a valid {role} path"));
        MissingRootSnafu {
            role,
            path: path.to_path_buf(),
        }
        .fail()
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to set up the event log"))]
    EventLogError { source: EventLogError },
    #[snafu(display("The {role} path {} does not exist", path.display()))]
    MissingRootError { role: RootRole, path: PathBuf },
    #[snafu(display("Critical failure encountered during synchronization"))]
    CycleError { source: SyncError },
}

impl ApplicationError {
    /// The log file is missing, so nothing could be recorded in it.
    pub fn is_missing_log_file(&self) -> bool {
        matches!(
            self,
            ApplicationError::EventLogError {
                source: EventLogError::NotFoundError { .. }
            }
        )
    }
}
