//! Auto-pause policy — how much cumulative inactivity a moogt tolerates.

use moogt_core::{DurationMs, MoogtState};

/// Decides the maximum cumulative inactivity before a live moogt is
/// auto-paused.
///
/// This is a seam, not a constant: products tune the threshold per moogt
/// (premium debates, moderated debates) without touching the sweep
/// arithmetic. The scheduler compares `record.count * idle_timeout` against
/// this value with a strict greater-than.
pub trait InactivityPolicy: Send + Sync {
    /// The inactivity budget for this moogt.
    fn max_inactive(&self, state: &MoogtState) -> DurationMs;
}

/// Default policy: two idle periods of slack.
///
/// The pause then lands on the third consecutive expired period — with a
/// 3-minute timeout, a moogt idle for 9 minutes is swept into pause with a
/// missed-turn count of 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInactivityPolicy;

impl InactivityPolicy for DefaultInactivityPolicy {
    fn max_inactive(&self, state: &MoogtState) -> DurationMs {
        state.idle_timeout.times(2)
    }
}

/// Fixed threshold regardless of the moogt's idle timeout.
#[derive(Debug, Clone, Copy)]
pub struct FixedInactivityPolicy(pub DurationMs);

impl InactivityPolicy for FixedInactivityPolicy {
    fn max_inactive(&self, _state: &MoogtState) -> DurationMs {
        self.0
    }
}
