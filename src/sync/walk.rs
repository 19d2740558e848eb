use std::path::{Path, PathBuf};

use snafu::ResultExt;
use walkdir::{DirEntry, WalkDir};

use super::error::{EntryError, RootUnreadableSnafu, SyncError};

/// Walks everything below `root` (not `root` itself) in file-name order,
/// parents before their children. Symbolic links are not followed.
pub(super) fn walk_below(root: &Path) -> walkdir::IntoIter {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
}

/// Splits walker errors into the ones that end the cycle (the root itself
/// cannot be read) and the ones that only cost a single entry.
pub(super) fn accept(
    root: &Path,
    entry: walkdir::Result<DirEntry>,
) -> Result<Result<DirEntry, EntryError>, SyncError> {
    match entry {
        Ok(entry) => Ok(Ok(entry)),
        Err(err) if err.depth() == 0 => Err(err).context(RootUnreadableSnafu {
            root: root.to_path_buf(),
        }),
        Err(err) => Ok(Err(EntryError::WalkError { source: err })),
    }
}

/// Maps `path`, which lives under `from_root`, onto the same relative path
/// under `to_root`.
pub(super) fn counterpart(path: &Path, from_root: &Path, to_root: &Path) -> Option<PathBuf> {
    path.strip_prefix(from_root)
        .ok()
        .map(|relative| to_root.join(relative))
}

/// True for directories, and for links that resolve to one.
pub(super) fn is_directory_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}
