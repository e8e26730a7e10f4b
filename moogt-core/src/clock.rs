//! The injected time source.
//!
//! The engines never call `Utc::now()` themselves — every operation takes
//! `now` as an argument, and the runtime reads it from a [`Clock`]. This is
//! the only time source in the system, which is what makes the lifecycle
//! deterministic under test and replay-safe in production.

use chrono::{DateTime, Utc};

/// Supplies the current instant.
///
/// Implementations:
/// - [`SystemClock`]: wall clock (production)
/// - `ManualClock` (test-utils): explicitly advanced in tests
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation backed by `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
