//! The moogt repository — aggregate persistence with optimistic versioning.

use crate::error::RepoError;
use crate::id::MoogtId;
use crate::moogt::MoogtState;
use async_trait::async_trait;

/// Loads and saves the moogt aggregate.
///
/// Correctness of concurrent sweeps and submissions rests on the persisted
/// version token, never on wall-clock ordering at the call site: `save`
/// must reject when `expected_version` no longer matches, so a submission
/// that logically precedes a sweep always wins. Callers additionally
/// serialize per-moogt access (the runtime holds a per-id lock).
#[async_trait]
pub trait MoogtRepository: Send + Sync {
    /// Store a freshly proposed moogt. Fails with [`RepoError::Duplicate`]
    /// if the ID is taken.
    async fn insert(&self, state: MoogtState) -> Result<(), RepoError>;

    /// Load the aggregate. Soft-deleted moogts are still loaded; screening
    /// them is the caller's concern.
    async fn load(&self, id: &MoogtId) -> Result<MoogtState, RepoError>;

    /// Persist the aggregate if `expected_version` still matches, returning
    /// the new version. [`RepoError::VersionConflict`] means another writer
    /// got there first; reload and retry.
    async fn save(&self, state: &MoogtState, expected_version: u64) -> Result<u64, RepoError>;
}
