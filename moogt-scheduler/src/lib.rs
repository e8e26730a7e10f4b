#![deny(missing_docs)]
//! Idle-sweep turn scheduler — pure evaluation of elapsed idle periods.
//!
//! `evaluate(state, now)` detects how many full idle periods elapsed since
//! the last turn, updates the missed-turn accounting, hands the turn to the
//! other side once per odd period count, and may auto-pause. No background
//! thread exists anywhere: read paths call this opportunistically before
//! rendering a moogt ("pull" sweeps), trading bounded staleness for zero
//! standing infrastructure.
//!
//! The sweep is replay-safe by construction. `latest_turn_at` advances by
//! exactly `missed * idle_timeout` — never to `now` — so repeated sweeps
//! stay period-aligned, and a second sweep at the same instant finds zero
//! newly expired periods and changes nothing.

mod policy;

pub use policy::{DefaultInactivityPolicy, FixedInactivityPolicy, InactivityPolicy};

use chrono::{DateTime, Utc};
use moogt_core::{MissedTurnRecord, MoogtEvent, MoogtState, MoogtStatus};
use std::sync::Arc;

/// Result of one sweep: the (possibly unchanged) successor state and the
/// events the sweep produced, in order. At most one `MissedTurnRecorded`
/// and at most one `AutoPaused` per sweep.
#[derive(Debug, Clone)]
pub struct Sweep {
    /// The successor state. Identical to the input when nothing elapsed.
    pub state: MoogtState,
    /// Ordered events for the caller to dispatch after persisting.
    pub events: Vec<MoogtEvent>,
}

impl Sweep {
    /// Whether the sweep changed anything worth persisting.
    pub fn changed(&self) -> bool {
        !self.events.is_empty()
    }
}

/// The turn scheduler. Stateless apart from its pause policy.
#[derive(Clone)]
pub struct TurnScheduler {
    policy: Arc<dyn InactivityPolicy>,
}

impl TurnScheduler {
    /// Scheduler with the given auto-pause policy.
    pub fn new(policy: Arc<dyn InactivityPolicy>) -> Self {
        Self { policy }
    }

    /// Evaluate elapsed idle periods against `state` as of `now`.
    ///
    /// No-op when the moogt is unstarted, ended, or paused — pause freezes
    /// the idle clock entirely, so a paused sweep touches no field. Never
    /// returns an error: ineligible states are idempotent no-ops.
    pub fn evaluate(&self, state: &MoogtState, now: DateTime<Utc>) -> Sweep {
        let unchanged = Sweep {
            state: state.clone(),
            events: Vec::new(),
        };

        if state.has_ended || state.is_paused {
            return unchanged;
        }
        let Some(latest) = state.latest_turn_at.filter(|_| state.is_started()) else {
            return unchanged;
        };
        let timeout_ms = state.idle_timeout.as_millis();
        if timeout_ms == 0 {
            return unchanged;
        }

        let elapsed_ms = (now - latest).num_milliseconds();
        if elapsed_ms < timeout_ms as i64 {
            return unchanged;
        }
        let missed = (elapsed_ms as u64 / timeout_ms) as u32;

        let mut next = state.clone();
        let mut events = Vec::new();

        // The side on the clock when the first period expired.
        let idle_side = state.next_side();

        let consecutive = match next.open_missed_turn_mut() {
            Some(record) => {
                record.consecutive_expired_turns_count += missed;
                record.consecutive_expired_turns_count
            }
            None => {
                // The record dates from the first boundary of the run, not
                // from whenever someone happened to look.
                let first_expiry = latest + state.idle_timeout.to_chrono();
                next.missed_turns
                    .push(MissedTurnRecord::new(missed, first_expiry));
                missed
            }
        };

        // Each full idle period hands the turn to the other side; an even
        // run of periods lands it back where it started.
        if missed % 2 == 1 {
            next.next_turn_is_proposition = !next.next_turn_is_proposition;
        }

        // Advance to the period boundary, never to `now`.
        let boundary = latest + state.idle_timeout.times(missed as u64).to_chrono();
        next.latest_turn_at = Some(boundary);

        events.push(MoogtEvent::MissedTurnRecorded {
            moogt: next.id.clone(),
            missed,
            consecutive,
            side: idle_side,
            at: boundary,
        });

        let cumulative = state.idle_timeout.times(consecutive as u64);
        if cumulative > self.policy.max_inactive(state) {
            // The pause anchors on the period boundary, not on `now`.
            next.is_paused = true;
            next.paused_at = Some(boundary);
            next.push_status(MoogtStatus::AutoPaused, boundary);
            events.push(MoogtEvent::AutoPaused {
                moogt: next.id.clone(),
                paused_at: boundary,
            });
        }

        Sweep {
            state: next,
            events,
        }
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new(Arc::new(DefaultInactivityPolicy))
    }
}
