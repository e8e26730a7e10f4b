#![deny(missing_docs)]
//! End resolver — how a moogt concludes.
//!
//! The interesting case is duration expiry. When the overall max duration
//! elapses, whoever did NOT post last is owed one more turn before the
//! moogt closes:
//!
//! - last post was the proposition's → a single `DurationOver` status is
//!   recorded, `has_ended` stays false, and the moogt waits in
//!   `DurationOverPendingLastWord` until the opposition's next accepted
//!   submission finalizes it;
//! - last post was the opposition's → `has_ended` flips immediately, with
//!   no intermediate status.
//!
//! The other terminal transitions (explicit end request, quit) are
//! single-actor and unambiguous; they live here because they share the
//! status bookkeeping.

use chrono::{DateTime, Utc};
use moogt_core::{EndError, EndRequestStatus, MoogtEvent, MoogtState, MoogtStatus, UserId};

/// A terminal (or pre-terminal) transition: successor state plus events.
#[derive(Debug, Clone)]
pub struct EndOutcome {
    /// The successor state.
    pub state: MoogtState,
    /// Ordered events for the caller to dispatch after persisting.
    pub events: Vec<MoogtEvent>,
}

/// How a debater answers an end request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndRequestReply {
    /// Agree to end; the moogt concludes.
    Concede,
    /// Decline; the moogt continues.
    Disagree,
}

/// Stateless resolver for every way a moogt concludes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndResolver;

impl EndResolver {
    /// Process an elapsed overall duration.
    ///
    /// Preconditions: `max_duration` set and strictly elapsed, not ended,
    /// and no prior `DurationOver`/`Ended`/`BrokeOff` status. The tie-break
    /// guarantees the side that did not post last gets the final word.
    pub fn create_moogt_over_status(
        state: &MoogtState,
        now: DateTime<Utc>,
    ) -> Result<EndOutcome, EndError> {
        if state.has_ended {
            return Err(EndError::AlreadyEnded);
        }
        if state.has_status(MoogtStatus::DurationOver) || state.end_status_recorded() {
            return Err(EndError::AlreadyResolved);
        }
        if !state.duration_expired(now) {
            return Err(EndError::NotExpired);
        }

        let mut next = state.clone();
        let mut events = Vec::new();

        if state.last_posted_by_proposition {
            // Opposition is owed one more turn. Mark and wait.
            next.push_status(MoogtStatus::DurationOver, now);
            events.push(MoogtEvent::DurationOver {
                moogt: next.id.clone(),
                at: now,
            });
        } else {
            next.has_ended = true;
            next.push_status(MoogtStatus::Ended, now);
            events.push(MoogtEvent::Ended {
                moogt: next.id.clone(),
                at: now,
            });
        }

        Ok(EndOutcome {
            state: next,
            events,
        })
    }

    /// Quiet form of [`Self::create_moogt_over_status`] for sweep paths:
    /// returns `None` when any precondition misses. Read paths call this on
    /// every render, so "nothing to do" is the common case, not an error.
    pub fn check_duration(state: &MoogtState, now: DateTime<Utc>) -> Option<EndOutcome> {
        Self::create_moogt_over_status(state, now).ok()
    }

    /// Close a moogt waiting in `DurationOverPendingLastWord`. Called by
    /// the argument gate when the owed submission is accepted, inside the
    /// same admission.
    pub fn finalize(state: &MoogtState, now: DateTime<Utc>) -> EndOutcome {
        let mut next = state.clone();
        next.has_ended = true;
        next.push_status(MoogtStatus::Ended, now);
        let events = vec![MoogtEvent::Ended {
            moogt: next.id.clone(),
            at: now,
        }];
        EndOutcome {
            state: next,
            events,
        }
    }

    /// A debater asks to end the moogt early.
    pub fn request_end(
        state: &MoogtState,
        actor: &UserId,
        now: DateTime<Utc>,
    ) -> Result<EndOutcome, EndError> {
        let Some(side) = state.side_of(actor) else {
            return Err(EndError::NotDebater);
        };
        if state.has_ended {
            return Err(EndError::AlreadyEnded);
        }
        if state.end_requested && state.end_request_status == EndRequestStatus::None {
            return Err(EndError::RequestPending);
        }

        let mut next = state.clone();
        next.end_requested = true;
        next.end_requested_by_proposition = side.is_proposition();
        next.end_request_status = EndRequestStatus::None;
        let events = vec![MoogtEvent::EndRequested {
            moogt: next.id.clone(),
            requester: actor.clone(),
            at: now,
        }];
        Ok(EndOutcome {
            state: next,
            events,
        })
    }

    /// The other debater answers a pending end request.
    pub fn respond_to_end_request(
        state: &MoogtState,
        actor: &UserId,
        reply: EndRequestReply,
        now: DateTime<Utc>,
    ) -> Result<EndOutcome, EndError> {
        let Some(side) = state.side_of(actor) else {
            return Err(EndError::NotDebater);
        };
        if state.has_ended {
            return Err(EndError::AlreadyEnded);
        }
        if !state.end_requested || state.end_request_status != EndRequestStatus::None {
            return Err(EndError::NoPendingRequest);
        }
        if side.is_proposition() == state.end_requested_by_proposition {
            return Err(EndError::WrongResponder);
        }

        let mut next = state.clone();
        let mut events = Vec::new();
        match reply {
            EndRequestReply::Concede => {
                next.end_request_status = EndRequestStatus::Concede;
                next.has_ended = true;
                next.push_status(MoogtStatus::Ended, now);
                events.push(MoogtEvent::EndRequestResolved {
                    moogt: next.id.clone(),
                    status: EndRequestStatus::Concede,
                    at: now,
                });
                events.push(MoogtEvent::Ended {
                    moogt: next.id.clone(),
                    at: now,
                });
            }
            EndRequestReply::Disagree => {
                next.end_request_status = EndRequestStatus::Disagree;
                events.push(MoogtEvent::EndRequestResolved {
                    moogt: next.id.clone(),
                    status: EndRequestStatus::Disagree,
                    at: now,
                });
            }
        }
        Ok(EndOutcome {
            state: next,
            events,
        })
    }

    /// A debater withdraws unilaterally. The moogt breaks off; the quitter
    /// keeps a single grace turn (admitted by the gate) and forfeits the
    /// concluding argument.
    pub fn quit(
        state: &MoogtState,
        actor: &UserId,
        now: DateTime<Utc>,
    ) -> Result<EndOutcome, EndError> {
        if state.side_of(actor).is_none() {
            return Err(EndError::NotDebater);
        }
        if state.has_ended {
            return Err(EndError::AlreadyEnded);
        }

        let mut next = state.clone();
        next.quit_by = Some(actor.clone());
        next.has_ended = true;
        next.push_status(MoogtStatus::BrokeOff, now);
        let events = vec![MoogtEvent::BrokeOff {
            moogt: next.id.clone(),
            quitter: actor.clone(),
            at: now,
        }];
        Ok(EndOutcome {
            state: next,
            events,
        })
    }
}
