//! # moogt-core — contracts for the moogt turn-lifecycle engine
//!
//! A moogt is a structured, turn-based debate between a proposition side and
//! an opposition side, optionally supervised by a moderator. This crate
//! defines the aggregate the engines operate on and the seams the engines
//! are wired through:
//!
//! | Concern | Types |
//! |---------|-------|
//! | Identity | [`MoogtId`], [`UserId`], [`ArgumentId`] |
//! | Time | [`Clock`], [`DurationMs`] |
//! | Aggregate | [`MoogtState`], [`MissedTurnRecord`], [`StatusRecord`] |
//! | Turn content | [`ArgumentKind`], [`ArgumentPayload`] |
//! | Events | [`MoogtEvent`] |
//! | Collaborators | [`ArgumentStore`], [`MoogtRepository`], [`NotificationSink`] |
//!
//! ## Design Principle
//!
//! Every lifecycle operation is a pure computation of shape
//! `(state, now) -> (state', events)`. Engines never read the wall clock,
//! never persist, never deliver notifications — the caller injects a
//! [`Clock`], persists through [`MoogtRepository`], and feeds the returned
//! event list to a dispatcher (outbox shape). This is what makes sweeps
//! replay-safe: an idle sweep can run opportunistically and repeatedly and
//! converge to the same persisted state.

#![deny(missing_docs)]

pub mod argument;
pub mod clock;
pub mod duration;
pub mod error;
pub mod event;
pub mod id;
pub mod moogt;
pub mod notify;
pub mod repo;
pub mod store;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use argument::{ArgumentKind, ArgumentPayload, ArgumentRecord, MAX_IMAGES};
pub use clock::{Clock, SystemClock};
pub use duration::DurationMs;
pub use error::{EndError, GateError, NotifyError, RepoError, StoreError};
pub use event::MoogtEvent;
pub use id::{ArgumentId, MoogtId, UserId};
pub use moogt::{
    EndRequestStatus, MissedTurnRecord, MoogtState, MoogtStatus, Phase, Side, StatusRecord,
};
pub use notify::NotificationSink;
pub use repo::MoogtRepository;
pub use store::ArgumentStore;
