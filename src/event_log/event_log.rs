use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use derive_more::Display;
use snafu::{ResultExt, Snafu, ensure};
use tracing::{error, info, warn};

/// Same layout as `2024-05-01 13:45:12,042`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventLevel {
    #[display("INFO")]
    Info,
    #[display("ERROR")]
    Error,
}

/// Line oriented event sink: `<timestamp> - <LEVEL> - <message>`.
///
/// Every record is flushed immediately and mirrored as a `tracing` event, so
/// diagnostics on stderr show the same history as the file.
pub struct EventLog<W: Write> {
    writer: W,
}

impl EventLog<File> {
    /// Opens an already existing log file for appending. The file is never
    /// created or truncated.
    pub fn open_existing(path: &Path) -> Result<Self, EventLogError> {
        ensure!(
            path.is_file(),
            NotFoundSnafu {
                path: path.to_path_buf()
            }
        );

        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .context(OpenSnafu {
                path: path.to_path_buf(),
            })?;

        Ok(Self::new(file))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn info(&mut self, message: impl fmt::Display) {
        self.record(EventLevel::Info, message);
    }

    pub fn error(&mut self, message: impl fmt::Display) {
        self.record(EventLevel::Error, message);
    }

    fn record(&mut self, level: EventLevel, message: impl fmt::Display) {
        match level {
            EventLevel::Info => info!("{message}"),
            EventLevel::Error => error!("{message}"),
        }

        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let written = writeln!(self.writer, "{timestamp} - {level} - {message}")
            .and_then(|()| self.writer.flush());
        if let Err(err) = written {
            warn!("Failed to append to the event log: {err}");
        }
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

#[cfg(test)]
impl EventLog<Vec<u8>> {
    /// Test helper: the `<LEVEL> - <message>` part of every line.
    pub fn entries(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.writer)
            .lines()
            .filter_map(|line| line.split_once(" - ").map(|(_, rest)| rest.to_string()))
            .collect()
    }
}

#[derive(Debug, Snafu)]
pub enum EventLogError {
    #[snafu(display("Log file {} not found", path.display()))]
    NotFoundError { path: PathBuf },
    #[snafu(display("Failed to open log file {} for appending", path.display()))]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },
}
