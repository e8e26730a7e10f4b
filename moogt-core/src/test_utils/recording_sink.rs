//! A notification sink that records instead of delivering.

use crate::error::NotifyError;
use crate::id::{MoogtId, UserId};
use crate::notify::NotificationSink;
use async_trait::async_trait;
use std::sync::Mutex;

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    /// Who was notified.
    pub recipient: UserId,
    /// The verb phrase.
    pub verb: String,
    /// The moogt referenced.
    pub target: MoogtId,
}

/// [`NotificationSink`] that appends every delivery to an in-memory log.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<SentNotification>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Deliveries with a given verb.
    pub fn sent_with_verb(&self, verb: &str) -> Vec<SentNotification> {
        self.sent()
            .into_iter()
            .filter(|n| n.verb == verb)
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(
        &self,
        recipient: &UserId,
        verb: &str,
        target: &MoogtId,
    ) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(SentNotification {
            recipient: recipient.clone(),
            verb: verb.to_string(),
            target: target.clone(),
        });
        Ok(())
    }
}
