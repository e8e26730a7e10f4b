//! Error types for each concern.
//!
//! Business-rule violations are values, not panics: the gate and resolver
//! return typed errors the caller maps to its own surface. Collaborator
//! failures (`StoreError`, `RepoError`, `NotifyError`) propagate unchanged.

use crate::id::MoogtId;
use thiserror::Error;

/// Submission rejections from the argument gate.
///
/// A rejected submission mutates nothing — the returned error is the whole
/// outcome.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// The moogt has no opposition yet; turns have not begun.
    #[error("moogt not started")]
    NotStarted,

    /// The actor is neither a debater nor the moderator.
    #[error("not a participant in this moogt")]
    NotParticipant,

    /// A debater posted out of turn.
    #[error("not your turn")]
    NotYourTurn,

    /// Normal submissions are closed; the moogt has ended.
    #[error("moogt already ended")]
    AlreadyEnded,

    /// Concluding arguments are only accepted after the moogt ends.
    #[error("concluding arguments require an ended moogt")]
    EndRequired,

    /// Each participant gets one concluding argument.
    #[error("concluding argument already posted")]
    DuplicateConcluding,

    /// The quitter forfeited concluding rights.
    #[error("quitting participant may not conclude")]
    QuitterForbidden,

    /// Image attachment limit exceeded.
    #[error("too many images: {count} (max {max})")]
    TooManyImages {
        /// Images attached to the submission.
        count: usize,
        /// The limit.
        max: usize,
    },

    /// Missed-turn markers are written by the scheduler, never submitted.
    #[error("reserved argument kind")]
    ReservedKind,
}

/// Rejections from the end resolver's transitions.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndError {
    /// The overall duration has not elapsed.
    #[error("max duration not elapsed")]
    NotExpired,

    /// A terminal (or duration-over) status was already recorded.
    #[error("end already resolved")]
    AlreadyResolved,

    /// The moogt has already ended.
    #[error("moogt already ended")]
    AlreadyEnded,

    /// Only seated debaters may end, quit, or request an end.
    #[error("only a debater may do this")]
    NotDebater,

    /// An end request is already awaiting an answer.
    #[error("end request already pending")]
    RequestPending,

    /// There is no end request to answer.
    #[error("no pending end request")]
    NoPendingRequest,

    /// Only the debater who did not file the request may answer it.
    #[error("request must be answered by the other debater")]
    WrongResponder,
}

/// Argument store failures.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed.
    #[error("storage failed: {0}")]
    Storage(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Moogt repository failures.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RepoError {
    /// No moogt with that ID.
    #[error("moogt not found: {0}")]
    NotFound(MoogtId),

    /// A moogt with that ID already exists.
    #[error("moogt already exists: {0}")]
    Duplicate(MoogtId),

    /// Save raced with another writer; reload and retry.
    #[error("version conflict: expected {expected}, found {actual}")]
    VersionConflict {
        /// The version the caller loaded.
        expected: u64,
        /// The version the repository holds.
        actual: u64,
    },

    /// The backing store failed.
    #[error("storage failed: {0}")]
    Storage(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Notification delivery failures. These are logged by the caller and never
/// roll back an accepted transition.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Delivery failed.
    #[error("notification failed: {0}")]
    Failed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
