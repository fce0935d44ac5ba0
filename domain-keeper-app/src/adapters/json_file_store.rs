//! JSON 文件键值存储
//!
//! 所有键保存在同一个 JSON 对象文件中，每次写入整体替换文件内容。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use domain_keeper_core::error::{CoreError, CoreResult};
use domain_keeper_core::traits::KeyValueStore;

/// File-backed store
pub struct JsonFileStore {
    path: PathBuf,
    /// 内存缓存（延迟加载）
    cache: RwLock<Option<BTreeMap<String, String>>>,
}

impl JsonFileStore {
    /// 创建存储实例，文件在首次写入时创建
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 从文件加载全部键值
    async fn load_from_file(&self) -> CoreResult<BTreeMap<String, String>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    /// 写入临时文件后再替换，避免半写状态
    async fn save_to_file(&self, entries: &BTreeMap<String, String>) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::StorageError(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to write store: {e}")))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save store: {e}")))?;

        log::debug!("Saved {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// 加载或初始化缓存（延迟加载）
    async fn ensure_cache(&self) -> CoreResult<()> {
        let cache = self.cache.read().await;
        if cache.is_none() {
            drop(cache);
            let data = self.load_from_file().await?;
            let mut cache = self.cache.write().await;
            if cache.is_none() {
                *cache = Some(data);
            }
        }
        Ok(())
    }

    async fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> CoreResult<()> {
        self.ensure_cache().await?;
        let mut cache = self.cache.write().await;
        let entries = cache
            .as_mut()
            .ok_or_else(|| CoreError::StorageError("Cache not initialized".to_string()))?;

        let mut next = entries.clone();
        apply(&mut next);
        self.save_to_file(&next).await?;
        *entries = next;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        self.ensure_cache().await?;
        let cache = self.cache.read().await;
        Ok(cache.as_ref().and_then(|c| c.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: String) -> CoreResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }
}
