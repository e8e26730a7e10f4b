#![deny(missing_docs)]
//! # moogt — umbrella crate
//!
//! Single import surface for the moogt lifecycle engine. Re-exports the
//! domain model and the engines behind feature flags, plus a `prelude` for
//! the happy path.

#[cfg(feature = "core")]
pub use moogt_core;
#[cfg(feature = "engines")]
pub use moogt_gate;
#[cfg(feature = "engines")]
pub use moogt_resolver;
#[cfg(feature = "runtime")]
pub use moogt_runtime;
#[cfg(feature = "engines")]
pub use moogt_scheduler;
#[cfg(feature = "store-memory")]
pub use moogt_store_memory;

/// Happy-path imports for running moogts.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use moogt_core::{
        ArgumentId, ArgumentKind, ArgumentPayload, ArgumentStore, Clock, DurationMs, MoogtEvent,
        MoogtId, MoogtRepository, MoogtState, MoogtStatus, NotificationSink, Phase, Side,
        SystemClock, UserId,
    };

    #[cfg(feature = "engines")]
    pub use moogt_gate::{Admission, ArgumentGate, SubmitContext};

    #[cfg(feature = "engines")]
    pub use moogt_resolver::{EndOutcome, EndRequestReply, EndResolver};

    #[cfg(feature = "engines")]
    pub use moogt_scheduler::{DefaultInactivityPolicy, InactivityPolicy, TurnScheduler};

    #[cfg(feature = "runtime")]
    pub use moogt_runtime::{MoogtService, ServiceError, SubmitReceipt};

    #[cfg(feature = "store-memory")]
    pub use moogt_store_memory::MemoryStore;
}
