//! 用户设置类型定义

use serde::{Deserialize, Serialize};

/// Default reminder offsets, in days before expiry
pub const DEFAULT_REMINDER_DAYS: [u32; 5] = [30, 15, 7, 3, 1];

fn default_reminder_days() -> Vec<u32> {
    DEFAULT_REMINDER_DAYS.to_vec()
}

fn default_true() -> bool {
    true
}

/// 用户设置（持久化键 `userSettings`）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Notification recipient
    pub email: String,
    pub notifications: NotificationSettings,
    pub preferences: Preferences,
    pub email_service: EmailServiceSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email: "admin@example.com".to_string(),
            notifications: NotificationSettings::default(),
            preferences: Preferences::default(),
            email_service: EmailServiceSettings::default(),
        }
    }
}

/// 通知偏好
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub expiry_reminders: bool,
    #[serde(default = "default_true")]
    pub renewal_confirmations: bool,
    #[serde(default = "default_true")]
    pub security_alerts: bool,
    #[serde(default)]
    pub weekly_summary: bool,
    /// Domain expiry thresholds, kept unique and sorted descending
    #[serde(default = "default_reminder_days")]
    pub reminder_days: Vec<u32>,
    #[serde(default = "default_true")]
    pub ssl_expiry_reminders: bool,
    /// SSL expiry thresholds, kept unique and sorted descending
    #[serde(default = "default_reminder_days")]
    pub ssl_reminder_days: Vec<u32>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            expiry_reminders: true,
            renewal_confirmations: true,
            security_alerts: true,
            weekly_summary: false,
            reminder_days: default_reminder_days(),
            ssl_expiry_reminders: true,
            ssl_reminder_days: default_reminder_days(),
        }
    }
}

/// 界面偏好
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Page shown after login
    pub default_view: String,
    pub auto_refresh: bool,
    /// Minutes between automatic refreshes
    pub refresh_interval: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_view: "dashboard".to_string(),
            auto_refresh: true,
            refresh_interval: 5,
        }
    }
}

/// 邮件服务配置（模拟，不会真正发送）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailServiceSettings {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    #[serde(rename = "useSSL")]
    pub use_ssl: bool,
    pub sender_email: String,
}

impl Default for EmailServiceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            use_ssl: false,
            sender_email: String::new(),
        }
    }
}

/// Which threshold list a toggle applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTarget {
    Domain,
    Ssl,
}

impl NotificationSettings {
    /// Adds `day` when absent, removes it when present.
    ///
    /// Returns whether the day is enabled afterwards.
    pub fn toggle_reminder_day(&mut self, target: ReminderTarget, day: u32) -> bool {
        let days = match target {
            ReminderTarget::Domain => &mut self.reminder_days,
            ReminderTarget::Ssl => &mut self.ssl_reminder_days,
        };
        let enabled = if let Some(index) = days.iter().position(|d| *d == day) {
            days.remove(index);
            false
        } else {
            days.push(day);
            true
        };
        normalize_days(days);
        enabled
    }

    /// Restores the unique, descending invariant after deserialization.
    pub fn normalize(&mut self) {
        normalize_days(&mut self.reminder_days);
        normalize_days(&mut self.ssl_reminder_days);
    }
}

fn normalize_days(days: &mut Vec<u32>) {
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
}
