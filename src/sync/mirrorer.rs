use std::fs::{self, File, FileTimes, Metadata};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use snafu::ResultExt;
use tracing::{debug, trace};
use walkdir::DirEntry;

use crate::event_log::EventLog;
use crate::ext::SystemTimeExt;

use super::error::{CopySnafu, CreateDirectorySnafu, EntryError, MetadataSnafu, SyncError};
use super::report::CycleReport;
use super::walk::{accept, counterpart, is_directory_like, walk_below};

/// How much newer a source file has to be before an existing replica copy is
/// considered stale. Absorbs timestamp granularity differences between
/// filesystems.
pub const MTIME_TOLERANCE: Duration = Duration::from_secs(1);

/// Makes sure every directory and file of `source_root` has an up to date
/// counterpart under `replica_root`.
pub fn mirror<W: Write>(
    source_root: &Path,
    replica_root: &Path,
    log: &mut EventLog<W>,
) -> Result<CycleReport, SyncError> {
    debug!(
        "Mirroring {} onto {}",
        source_root.display(),
        replica_root.display()
    );
    let mut report = CycleReport::default();
    for entry in walk_below(source_root) {
        let entry = match accept(source_root, entry)? {
            Ok(entry) => entry,
            Err(err) => {
                log.error(err);
                report.failures += 1;
                continue;
            }
        };

        let Some(target) = counterpart(entry.path(), source_root, replica_root) else {
            continue;
        };

        let outcome = if is_directory_like(&entry) {
            ensure_directory(&target, &mut report)
        } else {
            mirror_file(&entry, &target, log, &mut report)
        };

        if let Err(err) = outcome {
            log.error(err);
            report.failures += 1;
        }
    }

    Ok(report)
}

fn ensure_directory(target: &Path, report: &mut CycleReport) -> Result<(), EntryError> {
    if target.exists() {
        return Ok(());
    }

    fs::create_dir_all(target).context(CreateDirectorySnafu {
        path: target.to_path_buf(),
    })?;
    debug!("Created directory {}", target.display());
    report.created_directories += 1;
    Ok(())
}

fn mirror_file<W: Write>(
    entry: &DirEntry,
    target: &Path,
    log: &mut EventLog<W>,
    report: &mut CycleReport,
) -> Result<(), EntryError> {
    let source = entry.path();
    let source_metadata = fs::metadata(source).context(MetadataSnafu {
        path: source.to_path_buf(),
    })?;

    if !is_stale(source, &source_metadata, target)? {
        trace!("{} is up to date", target.display());
        return Ok(());
    }

    copy_with_times(source, target, &source_metadata).context(CopySnafu {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
    })?;

    let destination = target.parent().unwrap_or(target);
    log.info(format_args!(
        "Copied {} to {}",
        source.display(),
        destination.display()
    ));
    report.copied_files += 1;
    Ok(())
}

/// A missing target is always stale. An existing one only when the source was
/// modified more than `MTIME_TOLERANCE` after it; a newer replica is left alone.
fn is_stale(
    source: &Path,
    source_metadata: &Metadata,
    target: &Path,
) -> Result<bool, EntryError> {
    let target_metadata = match fs::metadata(target) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(true),
        Err(err) => {
            return Err(err).context(MetadataSnafu {
                path: target.to_path_buf(),
            });
        }
    };

    let source_modified = source_metadata.modified().context(MetadataSnafu {
        path: source.to_path_buf(),
    })?;
    let target_modified = target_metadata.modified().context(MetadataSnafu {
        path: target.to_path_buf(),
    })?;

    Ok(source_modified.is_newer_beyond(&target_modified, MTIME_TOLERANCE))
}

/// Copies content and permissions, then carries over access and modification
/// times.
fn copy_with_times(source: &Path, target: &Path, source_metadata: &Metadata) -> io::Result<()> {
    fs::copy(source, target)?;

    let mut times = FileTimes::new().set_modified(source_metadata.modified()?);
    if let Ok(accessed) = source_metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    open_for_times(target)?.set_times(times)
}

/// Changing timestamps needs write access to the attributes on Windows, while
/// on unix owning the file is enough, so read-only copies still work there.
fn open_for_times(path: &Path) -> io::Result<File> {
    #[cfg(target_family = "windows")]
    {
        File::options().write(true).open(path)
    }
    #[cfg(not(target_family = "windows"))]
    {
        File::open(path)
    }
}
