//! The moogt aggregate — every field the lifecycle engines read or write.
//!
//! The aggregate carries its satellites (missed-turn records, status
//! markers) so each engine is a pure function over one value. The repository
//! persists the whole aggregate under an optimistic version token; nothing
//! here talks to storage.

use crate::duration::DurationMs;
use crate::id::{MoogtId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which debater a user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The side that proposed the resolution.
    Proposition,
    /// The side arguing against the resolution.
    Opposition,
}

impl Side {
    /// The other debater.
    pub fn opponent(&self) -> Side {
        match self {
            Side::Proposition => Side::Opposition,
            Side::Opposition => Side::Proposition,
        }
    }

    /// Map the boolean turn/posted flags to a side.
    pub fn from_flag(is_proposition: bool) -> Side {
        if is_proposition {
            Side::Proposition
        } else {
            Side::Opposition
        }
    }

    /// Whether this is the proposition side.
    pub fn is_proposition(&self) -> bool {
        matches!(self, Side::Proposition)
    }
}

/// Where a moogt is in its lifecycle.
///
/// `Ended` is terminal (the one exception is the quitter's single grace
/// submission, which the gate admits without reviving the moogt).
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Proposed but not yet accepted by an opposition.
    Unstarted,
    /// Turns are being exchanged and the idle clock runs.
    Live,
    /// Manually paused or auto-paused; the idle clock is frozen.
    Paused,
    /// Overall duration elapsed but the side that did not post last is
    /// still owed the final word.
    DurationOverPendingLastWord,
    /// Closed. New normal turns are rejected.
    Ended,
}

/// Append-only lifecycle markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoogtStatus {
    /// Overall max duration elapsed with one grace turn still owed.
    /// Recorded at most once per moogt.
    DurationOver,
    /// The moogt concluded normally. Mutually exclusive with `BrokeOff`.
    Ended,
    /// A debater quit unilaterally. Mutually exclusive with `Ended`.
    BrokeOff,
    /// The scheduler suspended the moogt after prolonged inactivity.
    AutoPaused,
}

/// One recorded status marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Which marker.
    pub status: MoogtStatus,
    /// When it was recorded.
    pub at: DateTime<Utc>,
}

/// Outcome of an explicit end request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndRequestStatus {
    /// No request, or a request not yet answered.
    #[default]
    None,
    /// The other debater conceded; the moogt ended.
    Concede,
    /// The other debater declined; the moogt continues.
    Disagree,
}

/// Accounting record for consecutive expired idle periods.
///
/// At most one record is open at a time. Open means no debater has posted a
/// normal argument since the record was created; a fresh debater submission
/// closes it, which resets the cumulative-inactivity counter that drives
/// auto-pause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedTurnRecord {
    /// How many consecutive idle periods have expired unused.
    pub consecutive_expired_turns_count: u32,
    /// When the first period of this run expired.
    pub created_at: DateTime<Utc>,
    /// Set when a debater submission closed the record.
    pub closed_at: Option<DateTime<Utc>>,
}

impl MissedTurnRecord {
    /// Create an open record.
    pub fn new(count: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            consecutive_expired_turns_count: count,
            created_at,
            closed_at: None,
        }
    }

    /// Whether the record is still accumulating.
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

/// The moogt aggregate.
///
/// Invariants:
/// - `started_at.is_none()` ⇔ the moogt is not live yet
/// - `is_paused` ⇒ `paused_at` is set
/// - `latest_turn_at` is set whenever `started_at` is
/// - at most one open [`MissedTurnRecord`]
/// - `end_request_status != None` only after an end request existed
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoogtState {
    /// Identity of this moogt.
    pub id: MoogtId,
    /// The debater who proposed the resolution.
    pub proposition: UserId,
    /// The debater arguing against. None until someone accepts the proposal.
    pub opposition: Option<UserId>,
    /// Optional supervising moderator.
    pub moderator: Option<UserId>,
    /// The statement under debate.
    pub resolution: String,

    /// When the opposition accepted and turns began. None = not live.
    pub started_at: Option<DateTime<Utc>>,
    /// Baseline for idle accounting: the last accepted debater turn, or the
    /// last period boundary a sweep advanced it to. Never snapped to "now"
    /// by a sweep.
    pub latest_turn_at: Option<DateTime<Utc>>,
    /// Overall debate duration limit. None = unbounded.
    pub max_duration: Option<DurationMs>,
    /// How long a debater may take before the turn is forfeited.
    pub idle_timeout: DurationMs,

    /// Whose turn it is to post next.
    pub next_turn_is_proposition: bool,
    /// Which side posted the last accepted debater turn. Drives the
    /// duration-expiry tie-break.
    pub last_posted_by_proposition: bool,

    /// Whether the idle clock is frozen (manual pause or auto-pause).
    pub is_paused: bool,
    /// When the current pause began.
    pub paused_at: Option<DateTime<Utc>>,
    /// When the moogt last resumed.
    pub resumed_at: Option<DateTime<Utc>>,

    /// Terminal flag. See [`Phase::Ended`].
    pub has_ended: bool,
    /// An explicit end request is pending.
    pub end_requested: bool,
    /// Which side filed the pending/last end request.
    pub end_requested_by_proposition: bool,
    /// Outcome of the last end request.
    pub end_request_status: EndRequestStatus,

    /// The debater who quit unilaterally, if any.
    pub quit_by: Option<UserId>,
    /// Whether the quitter already used the single post-quit grace turn.
    pub quit_grace_used: bool,

    /// Soft-delete flag; a deleted moogt is invisible to the engines.
    pub is_deleted: bool,
    /// Optimistic concurrency token, bumped by the repository on save.
    pub version: u64,
    /// When the moogt was proposed.
    pub created_at: DateTime<Utc>,

    /// Idle accounting history. At most one open record.
    pub missed_turns: Vec<MissedTurnRecord>,
    /// Append-only lifecycle markers.
    pub statuses: Vec<StatusRecord>,
}

impl MoogtState {
    /// Create a freshly proposed (unstarted) moogt.
    pub fn new(
        id: MoogtId,
        proposition: UserId,
        resolution: impl Into<String>,
        idle_timeout: DurationMs,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            proposition,
            opposition: None,
            moderator: None,
            resolution: resolution.into(),
            started_at: None,
            latest_turn_at: None,
            max_duration: None,
            idle_timeout,
            next_turn_is_proposition: false,
            last_posted_by_proposition: true,
            is_paused: false,
            paused_at: None,
            resumed_at: None,
            has_ended: false,
            end_requested: false,
            end_requested_by_proposition: false,
            end_request_status: EndRequestStatus::None,
            quit_by: None,
            quit_grace_used: false,
            is_deleted: false,
            version: 0,
            created_at,
            missed_turns: Vec::new(),
            statuses: Vec::new(),
        }
    }

    /// Invite a specific opposition debater.
    pub fn with_opposition(mut self, opposition: UserId) -> Self {
        self.opposition = Some(opposition);
        self
    }

    /// Attach a moderator.
    pub fn with_moderator(mut self, moderator: UserId) -> Self {
        self.moderator = Some(moderator);
        self
    }

    /// Bound the overall debate duration.
    pub fn with_max_duration(mut self, max_duration: DurationMs) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    /// Whether turns have begun.
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Where the moogt is in its lifecycle.
    pub fn phase(&self) -> Phase {
        if self.has_ended {
            Phase::Ended
        } else if self.started_at.is_none() {
            Phase::Unstarted
        } else if self.is_paused {
            Phase::Paused
        } else if self.has_status(MoogtStatus::DurationOver) {
            Phase::DurationOverPendingLastWord
        } else {
            Phase::Live
        }
    }

    /// Which side a user debates on, if any.
    pub fn side_of(&self, user: &UserId) -> Option<Side> {
        if *user == self.proposition {
            Some(Side::Proposition)
        } else if self.opposition.as_ref() == Some(user) {
            Some(Side::Opposition)
        } else {
            None
        }
    }

    /// The debater on a given side, if one is seated.
    pub fn debater(&self, side: Side) -> Option<&UserId> {
        match side {
            Side::Proposition => Some(&self.proposition),
            Side::Opposition => self.opposition.as_ref(),
        }
    }

    /// Both seated debaters.
    pub fn debaters(&self) -> Vec<UserId> {
        let mut out = vec![self.proposition.clone()];
        out.extend(self.opposition.clone());
        out
    }

    /// Whether the user is the moderator.
    pub fn is_moderator(&self, user: &UserId) -> bool {
        self.moderator.as_ref() == Some(user)
    }

    /// Whether the user is a debater or the moderator.
    pub fn is_participant(&self, user: &UserId) -> bool {
        self.side_of(user).is_some() || self.is_moderator(user)
    }

    /// The side whose turn it is.
    pub fn next_side(&self) -> Side {
        Side::from_flag(self.next_turn_is_proposition)
    }

    /// Transition Unstarted → Live.
    ///
    /// The resolution counts as the proposition's opening word: the
    /// opposition moves first, and if the overall duration expires before
    /// anyone posts, the opposition is the side owed the final word.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.latest_turn_at = Some(now);
        self.last_posted_by_proposition = true;
        self.next_turn_is_proposition = false;
    }

    /// Freeze the idle clock.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        self.is_paused = true;
        self.paused_at = Some(now);
    }

    /// Unfreeze the idle clock, preserving the remaining idle time exactly:
    /// `latest_turn_at` moves forward by the length of the pause, so the
    /// next period boundary is as far away as it was at pause time.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if let (Some(latest), Some(paused_at)) = (self.latest_turn_at, self.paused_at) {
            self.latest_turn_at = Some(latest + (now - paused_at));
        }
        self.is_paused = false;
        self.paused_at = None;
        self.resumed_at = Some(now);
    }

    /// The open missed-turn record, if one is accumulating.
    pub fn open_missed_turn(&self) -> Option<&MissedTurnRecord> {
        self.missed_turns.iter().find(|r| r.is_open())
    }

    /// Mutable access to the open missed-turn record.
    pub fn open_missed_turn_mut(&mut self) -> Option<&mut MissedTurnRecord> {
        self.missed_turns.iter_mut().find(|r| r.is_open())
    }

    /// Close the open missed-turn record, if any. Called when a debater
    /// submission lands — the run of consecutive expired turns is broken.
    pub fn close_open_missed_turn(&mut self, at: DateTime<Utc>) {
        if let Some(record) = self.open_missed_turn_mut() {
            record.closed_at = Some(at);
        }
    }

    /// Whether a status marker was ever recorded.
    pub fn has_status(&self, status: MoogtStatus) -> bool {
        self.statuses.iter().any(|r| r.status == status)
    }

    /// Append a status marker.
    pub fn push_status(&mut self, status: MoogtStatus, at: DateTime<Utc>) {
        self.statuses.push(StatusRecord { status, at });
    }

    /// Whether an `Ended` or `BrokeOff` marker was recorded.
    pub fn end_status_recorded(&self) -> bool {
        self.has_status(MoogtStatus::Ended) || self.has_status(MoogtStatus::BrokeOff)
    }

    /// Duration expired but the final grace word is still owed.
    pub fn duration_over_pending(&self) -> bool {
        self.has_status(MoogtStatus::DurationOver) && !self.has_ended
    }

    /// Whether the overall duration limit has elapsed.
    pub fn duration_expired(&self, now: DateTime<Utc>) -> bool {
        match (self.started_at, self.max_duration) {
            (Some(started), Some(max)) => now - started > max.to_chrono(),
            _ => false,
        }
    }
}
