mod scheduler;
mod sleeper;

pub use scheduler::Scheduler;
pub use sleeper::{RuntimeSleeper, Sleeper};
