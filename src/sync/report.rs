use derive_more::Add;

/// Counters for what one pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Add)]
pub struct CycleReport {
    pub removed_files: usize,
    pub removed_directories: usize,
    pub copied_files: usize,
    pub created_directories: usize,
    /// Entries that were skipped after an error.
    pub failures: usize,
}

impl CycleReport {
    pub fn mutations(&self) -> usize {
        self.removed_files + self.removed_directories + self.copied_files + self.created_directories
    }
}
