//! Surface errors of the moogt service.

use moogt_core::{EndError, GateError, MoogtId, RepoError, StoreError};
use thiserror::Error;

/// Everything a service call can fail with.
///
/// Engine rejections arrive wrapped (`Gate`, `End`) so callers can map the
/// fine-grained reason to their own surface; infrastructure failures keep
/// their source error attached.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No moogt with that ID (or it was soft-deleted).
    #[error("moogt not found: {0}")]
    NotFound(MoogtId),

    /// Accept called on a moogt that already went live.
    #[error("moogt already started: {0}")]
    AlreadyStarted(MoogtId),

    /// Accept called by someone other than the invited opposition.
    #[error("not the invited opposition")]
    NotInvited,

    /// The argument gate rejected the submission.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// The end resolver rejected the transition.
    #[error(transparent)]
    End(#[from] EndError),

    /// Save raced with another writer.
    #[error("stale version: expected {expected}, found {actual}")]
    Conflict {
        /// The version this call loaded.
        expected: u64,
        /// The version the repository holds.
        actual: u64,
    },

    /// The argument store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The moogt repository failed.
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::VersionConflict { expected, actual } => {
                Self::Conflict { expected, actual }
            }
            other => Self::Repo(other),
        }
    }
}
