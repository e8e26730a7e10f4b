//! A clock that only moves when told to.

use crate::clock::Clock;
use crate::duration::DurationMs;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;

/// Deterministic [`Clock`]: starts at a fixed instant and advances only via
/// [`ManualClock::advance`] or [`ManualClock::set`].
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// A clock frozen at an arbitrary fixed instant.
    pub fn new() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    /// Move the clock forward.
    pub fn advance(&self, by: DurationMs) {
        let mut now = self.now.lock().unwrap();
        *now += by.to_chrono();
    }

    /// Jump to an exact instant.
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
