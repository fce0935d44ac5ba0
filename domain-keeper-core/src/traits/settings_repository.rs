//! 用户设置持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::UserSettings;

/// 用户设置仓库 Trait
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// 加载设置
    ///
    /// # Returns
    /// * `None` - 从未保存过（调用方使用默认值）
    async fn load(&self) -> CoreResult<Option<UserSettings>>;

    /// 保存设置
    async fn save(&self, settings: &UserSettings) -> CoreResult<()>;
}
