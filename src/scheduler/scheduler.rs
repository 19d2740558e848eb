use std::time::Duration;

use tracing::debug;

use super::Sleeper;

/// Runs a cycle, sleeps for the interval, and repeats.
///
/// Without a cycle limit the loop only ends when a cycle fails. With a limit
/// it returns after that many cycles, skipping the sleep after the last one.
pub struct Scheduler<S: Sleeper> {
    interval: Duration,
    sleeper: S,
    cycle_limit: Option<usize>,
}

impl<S: Sleeper> Scheduler<S> {
    pub fn new(interval: Duration, sleeper: S) -> Self {
        Self {
            interval,
            sleeper,
            cycle_limit: None,
        }
    }

    pub fn with_cycle_limit(mut self, cycle_limit: Option<usize>) -> Self {
        self.cycle_limit = cycle_limit;
        self
    }

    /// Returns the number of completed cycles once the limit is reached, or
    /// the first cycle error.
    pub async fn run<F, E>(&mut self, mut cycle: F) -> Result<usize, E>
    where
        F: FnMut(usize) -> Result<(), E>,
    {
        let mut completed = 0;

        loop {
            if self.limit_reached(completed) {
                return Ok(completed);
            }

            cycle(completed)?;
            completed += 1;

            if self.limit_reached(completed) {
                return Ok(completed);
            }

            debug!(
                "Cycle {} done, sleeping for {}s",
                completed,
                self.interval.as_secs()
            );
            self.sleeper.sleep(self.interval).await;
        }
    }

    fn limit_reached(&self, completed: usize) -> bool {
        self.cycle_limit.is_some_and(|limit| completed >= limit)
    }
}
