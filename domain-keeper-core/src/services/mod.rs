//! 业务逻辑服务层

pub mod analytics;
pub mod calendar;
mod domain_service;
pub mod listing;
mod profile_service;
mod reminder_service;
mod settings_service;

pub use domain_service::DomainService;
pub use profile_service::ProfileService;
pub use reminder_service::{DeliveryFailure, DispatchReport, ReminderService};
pub use settings_service::SettingsService;

use std::sync::Arc;

use crate::traits::{
    DomainRepository, LedgerRepository, NotificationSink, ProfileRepository, SettingsRepository,
};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
pub struct ServiceContext {
    /// 域名仓库
    pub domain_repository: Arc<dyn DomainRepository>,
    /// 用户设置仓库
    pub settings_repository: Arc<dyn SettingsRepository>,
    /// 用户资料仓库
    pub profile_repository: Arc<dyn ProfileRepository>,
    /// 提醒发送记录
    pub ledger_repository: Arc<dyn LedgerRepository>,
    /// 通知投递
    pub notification_sink: Arc<dyn NotificationSink>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        domain_repository: Arc<dyn DomainRepository>,
        settings_repository: Arc<dyn SettingsRepository>,
        profile_repository: Arc<dyn ProfileRepository>,
        ledger_repository: Arc<dyn LedgerRepository>,
        notification_sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            domain_repository,
            settings_repository,
            profile_repository,
            ledger_repository,
            notification_sink,
        }
    }
}
