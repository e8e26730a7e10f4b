//! A notification sink that always fails.

use crate::error::NotifyError;
use crate::id::{MoogtId, UserId};
use crate::notify::NotificationSink;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// [`NotificationSink`] that rejects every delivery. Used to prove that
/// delivery failures never roll back an accepted transition.
#[derive(Default)]
pub struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    /// Create a new failing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many deliveries were attempted.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSink for FailingSink {
    async fn notify(
        &self,
        _recipient: &UserId,
        _verb: &str,
        _target: &MoogtId,
    ) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Failed("sink unavailable".into()))
    }
}
