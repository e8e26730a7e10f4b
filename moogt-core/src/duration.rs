//! Stable duration type for lifecycle arithmetic and wire format.
//!
//! [`DurationMs`] serializes as a plain integer (milliseconds), not as
//! serde's internal `{"secs": N, "nanos": N}` format. Millisecond integers
//! also keep the period arithmetic in the turn scheduler exact: `floor(E/T)`
//! is plain integer division, with no sub-millisecond drift to accumulate
//! across repeated sweeps.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Duration in milliseconds with a stable JSON serialization format.
///
/// # Examples
///
/// ```
/// use moogt_core::DurationMs;
///
/// let d = DurationMs::from_mins(3);
/// assert_eq!(d.as_millis(), 180_000);
///
/// let json = serde_json::to_string(&d).unwrap();
/// assert_eq!(json, "180000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationMs(u64);

impl DurationMs {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Create from milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Create from seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Create from whole minutes.
    pub fn from_mins(mins: u64) -> Self {
        Self::from_secs(mins.saturating_mul(60))
    }

    /// Create from whole hours.
    pub fn from_hours(hours: u64) -> Self {
        Self::from_mins(hours.saturating_mul(60))
    }

    /// Get the value in milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Multiply by a whole number of periods.
    pub fn times(&self, n: u64) -> Self {
        Self(self.0.saturating_mul(n))
    }

    /// Convert to `std::time::Duration`.
    pub fn to_std(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Convert to a signed `chrono::Duration` for timestamp arithmetic.
    pub fn to_chrono(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.0 as i64)
    }
}

impl From<Duration> for DurationMs {
    fn from(d: Duration) -> Self {
        Self(d.as_millis() as u64)
    }
}

impl From<DurationMs> for Duration {
    fn from(d: DurationMs) -> Self {
        Duration::from_millis(d.0)
    }
}

impl Default for DurationMs {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for DurationMs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_agree() {
        assert_eq!(DurationMs::from_secs(60), DurationMs::from_mins(1));
        assert_eq!(DurationMs::from_mins(60), DurationMs::from_hours(1));
        assert_eq!(DurationMs::from_mins(3).as_millis(), 180_000);
    }

    #[test]
    fn times_scales_whole_periods() {
        let t = DurationMs::from_mins(3);
        assert_eq!(t.times(3), DurationMs::from_mins(9));
        assert_eq!(t.times(0), DurationMs::ZERO);
    }

    #[test]
    fn chrono_roundtrip() {
        let t = DurationMs::from_secs(90);
        assert_eq!(t.to_chrono().num_milliseconds(), 90_000);
        assert_eq!(DurationMs::from(t.to_std()), t);
    }
}
