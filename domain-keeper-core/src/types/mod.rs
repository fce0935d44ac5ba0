//! 类型定义模块

mod domain;
mod profile;
mod query;
mod settings;

pub use domain::{DomainDraft, DomainRecord, DomainStatus, IcpRecordStatus, SslCertificate};
pub(crate) use domain::non_blank;
pub use profile::{UpdateProfileRequest, UserProfile};
pub use query::{DomainQuery, SortField, SortOrder};
pub use settings::{
    EmailServiceSettings, NotificationSettings, Preferences, ReminderTarget, UserSettings,
    DEFAULT_REMINDER_DAYS,
};
