//! Domain Keeper Core Library
//!
//! 域名资产管理的核心业务逻辑，包括：
//! - 到期计算与状态判定 (engine)
//! - 到期提醒扫描 (reminder)
//! - 表单校验 (validation)
//! - 域名、设置、资料与提醒调度服务 (services)
//!
//! 存储与通知通过 trait 抽象，由平台层注入具体实现。

pub mod engine;
pub mod error;
pub mod reminder;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{
    DomainRepository, KeyValueStore, LedgerRepository, NotificationSink, ProfileRepository,
    SettingsRepository,
};
