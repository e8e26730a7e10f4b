//! The argument store — where turn content lives.

use crate::argument::{ArgumentKind, ArgumentPayload, ArgumentRecord};
use crate::error::StoreError;
use crate::id::{ArgumentId, MoogtId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persists turn records.
///
/// The trait is deliberately minimal — create plus the queries the gate and
/// rendering paths need. What "create" means physically (a row, a document,
/// a queue write) is the implementation's concern; the engines only care
/// that an accepted submission has a durable record with an identity.
///
/// Implementations:
/// - `moogt-store-memory`: HashMap (testing, single-process)
/// - a SQL adapter in the surrounding application (out of scope here)
#[async_trait]
pub trait ArgumentStore: Send + Sync {
    /// Persist a turn record and return its identity.
    async fn create(
        &self,
        moogt: &MoogtId,
        author: &UserId,
        kind: ArgumentKind,
        payload: ArgumentPayload,
        at: DateTime<Utc>,
    ) -> Result<ArgumentId, StoreError>;

    /// Kind of the most recent record for a moogt, if any.
    async fn latest_kind(&self, moogt: &MoogtId) -> Result<Option<ArgumentKind>, StoreError>;

    /// Whether the author already posted a concluding argument.
    /// This existence check — not turn order — is what enforces the
    /// one-concluding-per-participant rule.
    async fn has_concluding_by(
        &self,
        moogt: &MoogtId,
        author: &UserId,
    ) -> Result<bool, StoreError>;

    /// All records for a moogt in creation order.
    async fn list(&self, moogt: &MoogtId) -> Result<Vec<ArgumentRecord>, StoreError>;
}
