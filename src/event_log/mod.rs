//! The persisted audit trail of every mutation made to the replica.

mod event_log;

pub use event_log::{EventLog, EventLogError};
