use std::time::Duration;

/// The pause between two cycles.
pub trait Sleeper {
    async fn sleep(&mut self, duration: Duration);
}

/// Sleeps on the compio runtime timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeSleeper;

impl Sleeper for RuntimeSleeper {
    async fn sleep(&mut self, duration: Duration) {
        compio::time::sleep(duration).await;
    }
}
