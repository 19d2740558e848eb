use std::path::PathBuf;

use snafu::Snafu;

/// Aborts the whole cycle.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum SyncError {
    #[snafu(display("Failed to read tree root {}: {source}", root.display()))]
    RootUnreadableError {
        root: PathBuf,
        source: walkdir::Error,
    },
}

/// A failure confined to a single entry. It is logged and the walk moves on.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum EntryError {
    #[snafu(display("Failed to read entry: {source}"))]
    WalkError { source: walkdir::Error },
    #[snafu(display("Failed to remove {}: {source}", path.display()))]
    RemoveFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to remove directory {}: {source}", path.display()))]
    RemoveDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to create directory {}: {source}", path.display()))]
    CreateDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read metadata of {}: {source}", path.display()))]
    MetadataError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to copy {} to {}: {source}", from.display(), to.display()))]
    CopyError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}
