//! Turn content — the argument record and its domain-level kinds.

use crate::id::{ArgumentId, MoogtId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum images attached to a single argument.
pub const MAX_IMAGES: usize = 4;

/// What a stored turn record is.
///
/// One physical store may hold all three, but the distinction is made here
/// at the domain layer: a missed-turn marker is not content a user wrote,
/// even if it lives in the same table for storage compatibility.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    /// A regular turn submission.
    Normal,
    /// A final, one-per-participant statement after the moogt ended.
    Concluding,
    /// Scheduler-written marker for an expired idle period.
    MissedTurnMarker,
}

/// User-supplied content of a submission.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentPayload {
    /// The argument text.
    pub body: String,
    /// Attached image references.
    #[serde(default)]
    pub images: Vec<String>,
}

impl ArgumentPayload {
    /// Create a text-only payload.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            images: Vec::new(),
        }
    }

    /// Attach image references.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// A persisted turn record, as returned by an [`crate::ArgumentStore`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    /// Store-assigned identity.
    pub id: ArgumentId,
    /// The moogt this turn belongs to.
    pub moogt: MoogtId,
    /// Who authored it. The scheduler's markers carry the debater whose
    /// turn expired.
    pub author: UserId,
    /// What the record is.
    pub kind: ArgumentKind,
    /// Content. Empty for markers.
    pub payload: ArgumentPayload,
    /// When the record was created.
    pub at: DateTime<Utc>,
}

impl ArgumentRecord {
    /// Assemble a record, normally called by a store adapter once it has
    /// assigned the identity.
    pub fn new(
        id: ArgumentId,
        moogt: MoogtId,
        author: UserId,
        kind: ArgumentKind,
        payload: ArgumentPayload,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            moogt,
            author,
            kind,
            payload,
            at,
        }
    }
}
