//! Key-value store abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Key holding the domain collection (JSON array)
pub const DOMAINS_KEY: &str = "domains";
/// Key holding the user settings (JSON object)
pub const USER_SETTINGS_KEY: &str = "userSettings";
/// Key holding the local user profile (JSON object)
pub const USER_KEY: &str = "user";
/// Key holding the delivered-reminder ledger (JSON object)
pub const REMINDER_LEDGER_KEY: &str = "reminderLedger";

/// String key-value store, the local-storage equivalent
///
/// Values are whole JSON documents; every `set` replaces the previous value
/// (last write wins).
///
/// Implementations:
/// - `MemoryStore` (tests, ephemeral sessions)
/// - `JsonFileStore` (single JSON file on disk)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key was never written.
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> CoreResult<()>;

    async fn remove(&self, key: &str) -> CoreResult<()>;
}
