//! Notification delivery abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::reminder::ReminderEvent;

/// Delivers reminder events (email, webhook, log ...)
///
/// The core only produces events; at-most-once bookkeeping lives in
/// `ReminderService`, which marks an event fired only after `notify`
/// returns `Ok`.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one event to `recipient`.
    async fn notify(&self, recipient: &str, event: &ReminderEvent) -> CoreResult<()>;
}
