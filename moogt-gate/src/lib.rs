#![deny(missing_docs)]
//! Argument gate — validates and applies a proposed turn submission.
//!
//! `submit` is a pure function over the aggregate: rules are evaluated in
//! order and the first failure aborts with the input state untouched, so a
//! rejected submission leaves nothing to roll back. On acceptance the gate
//! returns the successor state; persisting the argument record itself and
//! announcing `ArgumentPosted` belong to the caller, which owns the unit of
//! work and the store-assigned argument ID.
//!
//! Actor rules, in brief:
//! - the moderator may always post a normal argument, but is turn-neutral —
//!   no turn flip, no `latest_turn_at` update, no missed-record close;
//! - a debater must post on their own turn while the moogt is live;
//! - after the moogt ends, only the quitter's single grace submission is
//!   admitted as a normal argument;
//! - concluding arguments require an ended moogt, are forbidden to the
//!   quitter, and are limited to one per participant via an existence
//!   check, not turn order.

use chrono::{DateTime, Utc};
use moogt_core::{
    ArgumentKind, ArgumentPayload, GateError, MoogtEvent, MoogtState, UserId, MAX_IMAGES,
};
use moogt_resolver::EndResolver;

/// Caller-supplied facts the gate cannot derive from the aggregate.
#[derive(Debug, Clone, Copy)]
pub struct SubmitContext {
    /// The injected current instant.
    pub now: DateTime<Utc>,
    /// Whether the actor already posted a concluding argument
    /// (from `ArgumentStore::has_concluding_by`).
    pub has_concluded: bool,
}

impl SubmitContext {
    /// Context for a normal submission.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            has_concluded: false,
        }
    }

    /// Attach the concluding-existence fact.
    pub fn with_concluded(mut self, has_concluded: bool) -> Self {
        self.has_concluded = has_concluded;
        self
    }
}

/// An accepted submission: the successor state plus any lifecycle events
/// beyond the posting itself (an `Ended` event when the submission pays off
/// a pending duration-over grace turn).
#[derive(Debug, Clone)]
pub struct Admission {
    /// The successor state.
    pub state: MoogtState,
    /// Ordered lifecycle events. Does not include `ArgumentPosted` — the
    /// caller emits that once the store has assigned an argument ID.
    pub events: Vec<MoogtEvent>,
}

impl Admission {
    /// Whether this admission concluded the moogt.
    pub fn ends_moogt(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, MoogtEvent::Ended { .. }))
    }
}

/// The argument gate. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentGate;

impl ArgumentGate {
    /// Validate and apply a submission. Rules run in order; the first
    /// failure aborts with no state mutation.
    pub fn submit(
        state: &MoogtState,
        actor: &UserId,
        kind: ArgumentKind,
        payload: &ArgumentPayload,
        ctx: SubmitContext,
    ) -> Result<Admission, GateError> {
        if !state.is_started() {
            return Err(GateError::NotStarted);
        }
        if payload.images.len() > MAX_IMAGES {
            return Err(GateError::TooManyImages {
                count: payload.images.len(),
                max: MAX_IMAGES,
            });
        }

        match kind {
            ArgumentKind::Normal => Self::submit_normal(state, actor, ctx),
            ArgumentKind::Concluding => Self::submit_concluding(state, actor, ctx),
            // Markers are scheduler bookkeeping, never user submissions.
            _ => Err(GateError::ReservedKind),
        }
    }

    fn submit_normal(
        state: &MoogtState,
        actor: &UserId,
        ctx: SubmitContext,
    ) -> Result<Admission, GateError> {
        if state.is_moderator(actor) {
            // Always permitted, entirely turn-neutral.
            return Ok(Admission {
                state: state.clone(),
                events: Vec::new(),
            });
        }
        let Some(side) = state.side_of(actor) else {
            return Err(GateError::NotParticipant);
        };

        if state.has_ended {
            let grace_available =
                state.quit_by.as_ref() == Some(actor) && !state.quit_grace_used;
            if !grace_available {
                return Err(GateError::AlreadyEnded);
            }
            // The single post-quit grace turn: admitted, but the moogt
            // stays ended and no turn field moves.
            let mut next = state.clone();
            next.quit_grace_used = true;
            return Ok(Admission {
                state: next,
                events: Vec::new(),
            });
        }

        if side != state.next_side() {
            return Err(GateError::NotYourTurn);
        }

        let mut next = state.clone();
        next.next_turn_is_proposition = !side.is_proposition();
        next.last_posted_by_proposition = side.is_proposition();
        next.latest_turn_at = Some(ctx.now);
        next.close_open_missed_turn(ctx.now);

        let mut events = Vec::new();
        if state.duration_over_pending() {
            // This submission is the owed final word; close the moogt in
            // the same admission.
            let finalized = EndResolver::finalize(&next, ctx.now);
            next = finalized.state;
            events.extend(finalized.events);
        }

        Ok(Admission {
            state: next,
            events,
        })
    }

    fn submit_concluding(
        state: &MoogtState,
        actor: &UserId,
        ctx: SubmitContext,
    ) -> Result<Admission, GateError> {
        if !state.is_participant(actor) {
            return Err(GateError::NotParticipant);
        }
        if !state.has_ended {
            return Err(GateError::EndRequired);
        }
        if state.quit_by.as_ref() == Some(actor) {
            return Err(GateError::QuitterForbidden);
        }
        if ctx.has_concluded {
            return Err(GateError::DuplicateConcluding);
        }
        Ok(Admission {
            state: state.clone(),
            events: Vec::new(),
        })
    }
}
