//! Reconciliation of a replica tree against its source.
//!
//! A cycle first prunes the replica of everything the source no longer has,
//! then walks the source top-down and copies whatever is missing or stale.
//! Nothing is kept in memory between cycles; the two trees on disk are the
//! only state.

mod cycle;
mod error;
mod mirrorer;
mod pruner;
mod report;
mod walk;

pub use cycle::run_cycle;
pub use error::SyncError;
