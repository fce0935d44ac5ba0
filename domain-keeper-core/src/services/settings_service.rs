//! 用户设置服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::reminder::ReminderConfig;
use crate::services::ServiceContext;
use crate::types::{ReminderTarget, UserSettings};

/// 用户设置服务
pub struct SettingsService {
    ctx: Arc<ServiceContext>,
}

impl SettingsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 加载设置
    ///
    /// Falls back to defaults when nothing was saved yet or the stored JSON
    /// is unreadable; storage failures still propagate.
    pub async fn load(&self) -> CoreResult<UserSettings> {
        match self.ctx.settings_repository.load().await {
            Ok(Some(mut settings)) => {
                settings.notifications.normalize();
                Ok(settings)
            }
            Ok(None) => Ok(UserSettings::default()),
            Err(crate::error::CoreError::SerializationError(e)) => {
                log::warn!("Stored settings are unreadable, using defaults: {e}");
                Ok(UserSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    /// 保存设置
    pub async fn save(&self, mut settings: UserSettings) -> CoreResult<UserSettings> {
        settings.notifications.normalize();
        self.ctx.settings_repository.save(&settings).await?;
        log::debug!("User settings saved");
        Ok(settings)
    }

    /// 重置为默认值
    pub async fn reset(&self) -> CoreResult<UserSettings> {
        self.save(UserSettings::default()).await
    }

    /// 切换提醒天数，返回切换后的状态
    pub async fn toggle_reminder_day(&self, target: ReminderTarget, day: u32) -> CoreResult<bool> {
        let mut settings = self.load().await?;
        let enabled = settings.notifications.toggle_reminder_day(target, day);
        self.save(settings).await?;
        Ok(enabled)
    }

    /// Domain expiry and SSL expiry reminder configs
    pub async fn reminder_configs(&self) -> CoreResult<(ReminderConfig, ReminderConfig)> {
        let settings = self.load().await?;
        Ok((
            ReminderConfig::domain_expiry(&settings.notifications),
            ReminderConfig::ssl_expiry(&settings.notifications),
        ))
    }
}
