//! Repositories over a [`KeyValueStore`]
//!
//! Each repository owns one key and stores its whole value as a JSON document.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use domain_keeper_core::error::{CoreError, CoreResult};
use domain_keeper_core::reminder::ReminderLedger;
use domain_keeper_core::traits::{
    DomainRepository, KeyValueStore, LedgerRepository, ProfileRepository, SettingsRepository,
    DOMAINS_KEY, REMINDER_LEDGER_KEY, USER_KEY, USER_SETTINGS_KEY,
};
use domain_keeper_core::types::{DomainRecord, UserProfile, UserSettings};

async fn read_json<T: DeserializeOwned + Send>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CoreResult<Option<T>> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| CoreError::SerializationError(format!("{key}: {e}")))
}

async fn write_json<T: Serialize + ?Sized + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> CoreResult<()> {
    let raw =
        serde_json::to_string(value).map_err(|e| CoreError::SerializationError(e.to_string()))?;
    store.set(key, raw).await
}

// ===== Domains =====

/// 域名集合，保存在 `domains` 键下的 JSON 数组
pub struct KvDomainRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvDomainRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> CoreResult<Vec<DomainRecord>> {
        Ok(read_json(self.store.as_ref(), DOMAINS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn store_all(&self, records: &[DomainRecord]) -> CoreResult<()> {
        write_json(self.store.as_ref(), DOMAINS_KEY, records).await?;
        log::debug!("Saved {} domains", records.len());
        Ok(())
    }
}

#[async_trait]
impl DomainRepository for KvDomainRepository {
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>> {
        self.load().await
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DomainRecord>> {
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    async fn save(&self, record: &DomainRecord) -> CoreResult<()> {
        let mut records = self.load().await?;
        if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
            *existing = record.clone();
        } else {
            records.push(record.clone());
        }
        self.store_all(&records).await
    }

    async fn save_all(&self, records: &[DomainRecord]) -> CoreResult<()> {
        self.store_all(records).await
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.store_all(&records).await?;
        Ok(true)
    }
}

// ===== Settings =====

pub struct KvSettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSettingsRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsRepository for KvSettingsRepository {
    async fn load(&self) -> CoreResult<Option<UserSettings>> {
        read_json(self.store.as_ref(), USER_SETTINGS_KEY).await
    }

    async fn save(&self, settings: &UserSettings) -> CoreResult<()> {
        write_json(self.store.as_ref(), USER_SETTINGS_KEY, settings).await
    }
}

// ===== Profile =====

pub struct KvProfileRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvProfileRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for KvProfileRepository {
    async fn load(&self) -> CoreResult<Option<UserProfile>> {
        read_json(self.store.as_ref(), USER_KEY).await
    }

    async fn save(&self, profile: &UserProfile) -> CoreResult<()> {
        write_json(self.store.as_ref(), USER_KEY, profile).await
    }
}

// ===== Reminder ledger =====

pub struct KvLedgerRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvLedgerRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LedgerRepository for KvLedgerRepository {
    async fn load(&self) -> CoreResult<Option<ReminderLedger>> {
        read_json(self.store.as_ref(), REMINDER_LEDGER_KEY).await
    }

    async fn save(&self, ledger: &ReminderLedger) -> CoreResult<()> {
        write_json(self.store.as_ref(), REMINDER_LEDGER_KEY, ledger).await
    }
}
