//! Notification sinks

use std::sync::Arc;

use async_trait::async_trait;

use domain_keeper_core::error::{CoreError, CoreResult};
use domain_keeper_core::reminder::ReminderEvent;
use domain_keeper_core::traits::{NotificationSink, SettingsRepository};

/// Writes every reminder to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn notify(&self, recipient: &str, event: &ReminderEvent) -> CoreResult<()> {
        log::info!("发送通知到 {recipient}: {}", event.message());
        Ok(())
    }
}

/// Mocked email delivery
///
/// Honors the `emailService` section of the user settings but never opens a
/// connection; the composed mail is logged instead.
pub struct MailLogSink {
    settings: Arc<dyn SettingsRepository>,
}

impl MailLogSink {
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl NotificationSink for MailLogSink {
    async fn notify(&self, recipient: &str, event: &ReminderEvent) -> CoreResult<()> {
        let settings = self.settings.load().await?.unwrap_or_default();
        let mail = &settings.email_service;
        if !mail.enabled {
            return Err(CoreError::NotificationError(
                "email service is disabled".to_string(),
            ));
        }
        if recipient.trim().is_empty() {
            return Err(CoreError::NotificationError(
                "no recipient configured".to_string(),
            ));
        }

        let sender = if mail.sender_email.is_empty() {
            mail.username.as_str()
        } else {
            mail.sender_email.as_str()
        };
        log::info!(
            "发送邮件 {}:{} (ssl={}) {sender} -> {recipient} | {} | {}",
            mail.smtp_server,
            mail.smtp_port,
            mail.use_ssl,
            event.subject(),
            event.message()
        );
        Ok(())
    }
}
