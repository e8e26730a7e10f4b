//! Lifecycle events — the ordered list every operation returns.
//!
//! Engines mutate nothing outside the aggregate; everything that should
//! reach the outside world (notifications, marker records, score updates)
//! is declared as an event here and executed by the caller after the state
//! is persisted. A dropped event list loses a notification, never a state
//! transition.

use crate::argument::ArgumentKind;
use crate::id::{ArgumentId, MoogtId, UserId};
use crate::moogt::{EndRequestStatus, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the lifecycle engines can announce.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoogtEvent {
    /// The opposition accepted the proposal; turns began.
    Started {
        /// The moogt that went live.
        moogt: MoogtId,
        /// The accepting opposition debater.
        opposition: UserId,
        /// When turns began.
        at: DateTime<Utc>,
    },

    /// An idle sweep found expired periods and updated the accounting.
    MissedTurnRecorded {
        /// The swept moogt.
        moogt: MoogtId,
        /// Periods found expired by this sweep.
        missed: u32,
        /// Consecutive expired periods on the open record after this sweep.
        consecutive: u32,
        /// The side whose turn expired first in this sweep.
        side: Side,
        /// The period boundary the accounting advanced to.
        at: DateTime<Utc>,
    },

    /// Cumulative inactivity crossed the policy threshold.
    AutoPaused {
        /// The suspended moogt.
        moogt: MoogtId,
        /// The period boundary the pause is anchored to.
        paused_at: DateTime<Utc>,
    },

    /// A submission was accepted and persisted.
    ArgumentPosted {
        /// The moogt posted to.
        moogt: MoogtId,
        /// The stored argument.
        argument: ArgumentId,
        /// Who posted.
        author: UserId,
        /// Normal or concluding.
        kind: ArgumentKind,
        /// When it was accepted.
        at: DateTime<Utc>,
    },

    /// Overall duration elapsed with the final word still owed.
    DurationOver {
        /// The affected moogt.
        moogt: MoogtId,
        /// When the expiry was processed.
        at: DateTime<Utc>,
    },

    /// The moogt concluded.
    Ended {
        /// The concluded moogt.
        moogt: MoogtId,
        /// When it concluded.
        at: DateTime<Utc>,
    },

    /// A debater quit unilaterally.
    BrokeOff {
        /// The affected moogt.
        moogt: MoogtId,
        /// Who quit.
        quitter: UserId,
        /// When.
        at: DateTime<Utc>,
    },

    /// A debater asked to end the moogt early.
    EndRequested {
        /// The affected moogt.
        moogt: MoogtId,
        /// Who asked.
        requester: UserId,
        /// When.
        at: DateTime<Utc>,
    },

    /// The other debater answered the end request.
    EndRequestResolved {
        /// The affected moogt.
        moogt: MoogtId,
        /// Concede or disagree.
        status: EndRequestStatus,
        /// When.
        at: DateTime<Utc>,
    },

    /// The idle clock was frozen manually.
    Paused {
        /// The affected moogt.
        moogt: MoogtId,
        /// When.
        at: DateTime<Utc>,
    },

    /// The idle clock was unfrozen.
    Resumed {
        /// The affected moogt.
        moogt: MoogtId,
        /// When.
        at: DateTime<Utc>,
    },
}

impl MoogtEvent {
    /// The moogt the event belongs to.
    pub fn moogt(&self) -> &MoogtId {
        match self {
            MoogtEvent::Started { moogt, .. }
            | MoogtEvent::MissedTurnRecorded { moogt, .. }
            | MoogtEvent::AutoPaused { moogt, .. }
            | MoogtEvent::ArgumentPosted { moogt, .. }
            | MoogtEvent::DurationOver { moogt, .. }
            | MoogtEvent::Ended { moogt, .. }
            | MoogtEvent::BrokeOff { moogt, .. }
            | MoogtEvent::EndRequested { moogt, .. }
            | MoogtEvent::EndRequestResolved { moogt, .. }
            | MoogtEvent::Paused { moogt, .. }
            | MoogtEvent::Resumed { moogt, .. } => moogt,
        }
    }
}
