use std::time::{Duration, SystemTime};

pub trait SystemTimeExt {
    /// True when `self` is later than `other` by strictly more than `tolerance`.
    /// An earlier `self` is never considered newer.
    fn is_newer_beyond(&self, other: &SystemTime, tolerance: Duration) -> bool;
}

impl SystemTimeExt for SystemTime {
    fn is_newer_beyond(&self, other: &SystemTime, tolerance: Duration) -> bool {
        self.duration_since(*other)
            .is_ok_and(|difference| difference > tolerance)
    }
}
