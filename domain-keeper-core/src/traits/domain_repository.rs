//! 域名持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DomainRecord;

/// 域名仓库 Trait
///
/// Cached `status` fields are returned as stored; services recompute them
/// before anything leaves the core.
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// 获取全部域名（保持存储顺序）
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>>;

    /// 根据 ID 获取域名
    ///
    /// # Returns
    /// * `Some(record)` - 找到
    /// * `None` - 不存在
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DomainRecord>>;

    /// 保存域名（新增或整条替换）
    async fn save(&self, record: &DomainRecord) -> CoreResult<()>;

    /// 整体替换域名集合
    async fn save_all(&self, records: &[DomainRecord]) -> CoreResult<()>;

    /// 删除域名
    ///
    /// # Returns
    /// * `true` - 已删除
    /// * `false` - 原本不存在
    async fn delete(&self, id: &str) -> CoreResult<bool>;
}
