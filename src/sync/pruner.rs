use std::fs;
use std::io::{self, Write};
use std::path::Path;

use snafu::ResultExt;
use tracing::debug;

use crate::event_log::EventLog;

use super::error::{RemoveDirectorySnafu, RemoveFileSnafu, SyncError};
use super::report::CycleReport;
use super::walk::{accept, counterpart, walk_below};

/// How the pruner deletes replica entries.
pub trait Remover {
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Deletes the directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

pub struct FsRemover;

impl Remover for FsRemover {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

/// Removes every entry of `replica_root` whose relative path does not exist
/// under `source_root`. A missing directory is removed with its whole subtree
/// and the walk does not descend into it.
pub fn prune<W: Write>(
    source_root: &Path,
    replica_root: &Path,
    log: &mut EventLog<W>,
) -> Result<CycleReport, SyncError> {
    prune_with(source_root, replica_root, &FsRemover, log)
}

pub fn prune_with<R: Remover, W: Write>(
    source_root: &Path,
    replica_root: &Path,
    remover: &R,
    log: &mut EventLog<W>,
) -> Result<CycleReport, SyncError> {
    debug!(
        "Pruning {} against {}",
        replica_root.display(),
        source_root.display()
    );
    let mut report = CycleReport::default();
    let mut entries = walk_below(replica_root);

    while let Some(entry) = entries.next() {
        let entry = match accept(replica_root, entry)? {
            Ok(entry) => entry,
            Err(err) => {
                log.error(err);
                report.failures += 1;
                continue;
            }
        };

        let replica_path = entry.path();
        let Some(source_path) = counterpart(replica_path, replica_root, source_root) else {
            continue;
        };
        if source_path.exists() {
            continue;
        }

        if entry.file_type().is_dir() {
            // Must happen before the next call to `next`, otherwise the walker
            // would try to open the directory removed below.
            entries.skip_current_dir();

            match remover.remove_dir_all(replica_path).context(RemoveDirectorySnafu {
                path: replica_path.to_path_buf(),
            }) {
                Ok(()) => {
                    log.info(format_args!("Removed directory {}", replica_path.display()));
                    report.removed_directories += 1;
                }
                Err(err) => {
                    log.error(err);
                    report.failures += 1;
                }
            }
        } else {
            match remover.remove_file(replica_path).context(RemoveFileSnafu {
                path: replica_path.to_path_buf(),
            }) {
                Ok(()) => {
                    log.info(format_args!("Removed {}", replica_path.display()));
                    report.removed_files += 1;
                }
                Err(err) => {
                    log.error(err);
                    report.failures += 1;
                }
            }
        }
    }

    Ok(report)
}
