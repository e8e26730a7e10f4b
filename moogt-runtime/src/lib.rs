#![deny(missing_docs)]
//! Service facade for the moogt lifecycle engine.
//!
//! [`MoogtService`] wires the pure engines (scheduler, gate, resolver) to
//! the collaborator traits (repository, argument store, notification sink,
//! clock) and owns the two things engines deliberately don't: per-moogt
//! write serialization and event dispatch. Engines compute successor
//! states; this crate persists them and delivers their side effects.
//!
//! There is no background worker. Idle time is accounted lazily: read and
//! write paths call [`MoogtService::evaluate_and_persist`] (or get the same
//! sweep implicitly inside `submit_argument`), so a moogt's accounting is
//! correct as of the last time anyone looked at it.

mod dispatch;
mod error;
mod service;

pub use error::ServiceError;
pub use service::{MoogtService, SubmitReceipt};
