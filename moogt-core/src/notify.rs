//! The notification sink — best-effort delivery to participants.

use crate::error::NotifyError;
use crate::id::{MoogtId, UserId};
use async_trait::async_trait;

/// Delivers a notification to one recipient.
///
/// Fire-and-forget from the engine's point of view: the caller logs a
/// failure and moves on. A delivery failure must never roll back an
/// already-accepted state transition, so nothing downstream of this trait
/// may participate in the unit of work.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Tell `recipient` that something happened on `target`.
    /// `verb` is a short human phrase ("posted an argument", "auto paused").
    async fn notify(
        &self,
        recipient: &UserId,
        verb: &str,
        target: &MoogtId,
    ) -> Result<(), NotifyError>;
}
