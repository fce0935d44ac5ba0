//! 提醒发送记录持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::reminder::ReminderLedger;

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// `None` when no reminder was ever delivered
    async fn load(&self) -> CoreResult<Option<ReminderLedger>>;

    async fn save(&self, ledger: &ReminderLedger) -> CoreResult<()>;
}
