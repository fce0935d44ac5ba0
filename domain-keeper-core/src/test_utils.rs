//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::reminder::{ReminderEvent, ReminderLedger};
use crate::services::ServiceContext;
use crate::traits::{
    DomainRepository, LedgerRepository, NotificationSink, ProfileRepository, SettingsRepository,
};
use crate::types::{
    DomainDraft, DomainRecord, DomainStatus, IcpRecordStatus, UserProfile, UserSettings,
};

// ===== MockDomainRepository =====

pub struct MockDomainRepository {
    records: RwLock<Vec<DomainRecord>>,
    /// 如果 Some，save 时返回此错误
    save_error: RwLock<Option<String>>,
}

impl MockDomainRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    /// Inserts raw records, bypassing validation
    pub async fn seed(&self, records: Vec<DomainRecord>) {
        self.records.write().await.extend(records);
    }

    async fn check_save_error(&self) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DomainRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn save(&self, record: &DomainRecord) -> CoreResult<()> {
        self.check_save_error().await?;
        let mut store = self.records.write().await;
        if let Some(existing) = store.iter_mut().find(|r| r.id == record.id) {
            *existing = record.clone();
        } else {
            store.push(record.clone());
        }
        Ok(())
    }

    async fn save_all(&self, records: &[DomainRecord]) -> CoreResult<()> {
        self.check_save_error().await?;
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let mut store = self.records.write().await;
        let before = store.len();
        store.retain(|r| r.id != id);
        Ok(store.len() != before)
    }
}

// ===== MockSettingsRepository =====

pub struct MockSettingsRepository {
    settings: RwLock<Option<UserSettings>>,
    /// 模拟损坏的存储数据
    corrupt: RwLock<bool>,
}

impl MockSettingsRepository {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(None),
            corrupt: RwLock::new(false),
        }
    }

    pub async fn set_corrupt(&self, corrupt: bool) {
        *self.corrupt.write().await = corrupt;
    }
}

#[async_trait]
impl SettingsRepository for MockSettingsRepository {
    async fn load(&self) -> CoreResult<Option<UserSettings>> {
        if *self.corrupt.read().await {
            return Err(CoreError::SerializationError(
                "expected value at line 1 column 1".to_string(),
            ));
        }
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &UserSettings) -> CoreResult<()> {
        *self.corrupt.write().await = false;
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }
}

// ===== MockProfileRepository =====

pub struct MockProfileRepository {
    profile: RwLock<Option<UserProfile>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self {
            profile: RwLock::new(None),
        }
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn load(&self) -> CoreResult<Option<UserProfile>> {
        Ok(self.profile.read().await.clone())
    }

    async fn save(&self, profile: &UserProfile) -> CoreResult<()> {
        *self.profile.write().await = Some(profile.clone());
        Ok(())
    }
}

// ===== MockLedgerRepository =====

pub struct MockLedgerRepository {
    ledger: RwLock<Option<ReminderLedger>>,
    saves: RwLock<usize>,
}

impl MockLedgerRepository {
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(None),
            saves: RwLock::new(0),
        }
    }

    pub async fn stored(&self) -> Option<ReminderLedger> {
        self.ledger.read().await.clone()
    }

    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl LedgerRepository for MockLedgerRepository {
    async fn load(&self) -> CoreResult<Option<ReminderLedger>> {
        Ok(self.ledger.read().await.clone())
    }

    async fn save(&self, ledger: &ReminderLedger) -> CoreResult<()> {
        *self.ledger.write().await = Some(ledger.clone());
        *self.saves.write().await += 1;
        Ok(())
    }
}

// ===== RecordingSink =====

/// Records delivered events; optionally fails every delivery
pub struct RecordingSink {
    delivered: RwLock<Vec<(String, ReminderEvent)>>,
    fail: RwLock<bool>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            delivered: RwLock::new(Vec::new()),
            fail: RwLock::new(false),
        }
    }

    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn delivered(&self) -> Vec<(String, ReminderEvent)> {
        self.delivered.read().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, recipient: &str, event: &ReminderEvent) -> CoreResult<()> {
        if *self.fail.read().await {
            return Err(CoreError::NotificationError("smtp unreachable".to_string()));
        }
        self.delivered
            .write()
            .await
            .push((recipient.to_string(), event.clone()));
        Ok(())
    }
}

// ===== 工厂方法 =====

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub domains: Arc<MockDomainRepository>,
    pub settings: Arc<MockSettingsRepository>,
    pub profile: Arc<MockProfileRepository>,
    pub ledger: Arc<MockLedgerRepository>,
    pub sink: Arc<RecordingSink>,
}

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> TestContext {
    let domains = Arc::new(MockDomainRepository::new());
    let settings = Arc::new(MockSettingsRepository::new());
    let profile = Arc::new(MockProfileRepository::new());
    let ledger = Arc::new(MockLedgerRepository::new());
    let sink = Arc::new(RecordingSink::new());

    let ctx = Arc::new(ServiceContext::new(
        domains.clone(),
        settings.clone(),
        profile.clone(),
        ledger.clone(),
        sink.clone(),
    ));

    TestContext {
        ctx,
        domains,
        settings,
        profile,
        ledger,
        sink,
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// 创建一个用于测试的域名记录（缓存状态故意为 Active）
pub fn test_record(id: &str, name: &str, expiry: &str) -> DomainRecord {
    DomainRecord {
        id: id.to_string(),
        name: name.to_string(),
        registrar: "阿里云".to_string(),
        dns_provider: "Cloudflare".to_string(),
        purchase_date: "2020-01-01".to_string(),
        expiry_date: expiry.to_string(),
        auto_renew: false,
        status: DomainStatus::Active,
        notes: None,
        icp_record_number: None,
        icp_record_status: IcpRecordStatus::None,
        ssl_certificate: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// 创建一个合法的表单草稿
pub fn test_draft(name: &str, expiry: &str) -> DomainDraft {
    DomainDraft {
        name: name.to_string(),
        registrar: "腾讯云".to_string(),
        dns_provider: "DNSPod".to_string(),
        purchase_date: "2024-01-15".to_string(),
        expiry_date: expiry.to_string(),
        ..DomainDraft::default()
    }
}
