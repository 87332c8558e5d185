//! Operator registry
//!
//! The allow-list of user ids permitted to run admin workflows. The registry
//! is a process-wide object injected into the dialogue; every mutation is
//! persisted through an `OperatorStorage` backend before the in-process copy
//! is replaced, so no caller observes a stale list after a successful change.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use crate::utils::errors::{FaqBotError, Result};

/// Outcome of an allow-list mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum OperatorChange {
    Applied,
    AlreadyPresent,
    NotPresent,
    /// Removing the final operator is refused
    LastOperator,
}

/// Durable home of the ordered operator list
#[async_trait]
pub trait OperatorStorage: Send + Sync {
    async fn load(&self) -> Result<Vec<i64>>;

    async fn save(&self, operators: &[i64]) -> Result<()>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Allow-list with a synchronously refreshed in-process copy
pub struct OperatorRegistry {
    storage: Arc<dyn OperatorStorage>,
    operators: RwLock<Vec<i64>>,
}

impl OperatorRegistry {
    /// Load the current list from storage
    pub async fn load(storage: Arc<dyn OperatorStorage>) -> Result<Self> {
        let operators = dedup_preserving_order(storage.load().await?);
        info!(storage = %storage.describe(), count = operators.len(), "Operator registry loaded");
        Ok(Self {
            storage,
            operators: RwLock::new(operators),
        })
    }

    /// Seed the given ids when the stored list is empty
    pub async fn bootstrap(&self, seed: &[i64]) -> Result<usize> {
        let mut operators = self.operators.write().await;
        if !operators.is_empty() || seed.is_empty() {
            return Ok(0);
        }

        let seeded = dedup_preserving_order(seed.to_vec());
        self.storage.save(&seeded).await?;
        let count = seeded.len();
        *operators = seeded;
        info!(count = count, "Seeded operator allow-list from configuration");
        Ok(count)
    }

    pub async fn list_operators(&self) -> Vec<i64> {
        self.operators.read().await.clone()
    }

    pub async fn is_operator(&self, user_id: i64) -> bool {
        self.operators.read().await.contains(&user_id)
    }

    pub async fn add_operator(&self, user_id: i64) -> Result<OperatorChange> {
        let mut operators = self.operators.write().await;
        if operators.contains(&user_id) {
            return Ok(OperatorChange::AlreadyPresent);
        }

        let mut updated = operators.clone();
        updated.push(user_id);
        self.storage.save(&updated).await?;
        *operators = updated;

        debug!(user_id = user_id, "Operator added");
        Ok(OperatorChange::Applied)
    }

    pub async fn remove_operator(&self, user_id: i64) -> Result<OperatorChange> {
        let mut operators = self.operators.write().await;
        if !operators.contains(&user_id) {
            return Ok(OperatorChange::NotPresent);
        }
        if operators.len() == 1 {
            return Ok(OperatorChange::LastOperator);
        }

        let updated: Vec<i64> = operators.iter().copied().filter(|id| *id != user_id).collect();
        self.storage.save(&updated).await?;
        *operators = updated;

        debug!(user_id = user_id, "Operator removed");
        Ok(OperatorChange::Applied)
    }
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("storage", &self.storage.describe())
            .finish_non_exhaustive()
    }
}

fn dedup_preserving_order(ids: Vec<i64>) -> Vec<i64> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// JSON file holding a list of integers, e.g. `[123, 456]`
#[derive(Debug, Clone)]
pub struct JsonFileOperatorStorage {
    path: PathBuf,
    // Serializes writers so the temp file is never shared
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileOperatorStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "operators.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl OperatorStorage for JsonFileOperatorStorage {
    async fn load(&self) -> Result<Vec<i64>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Operators file not found, starting empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, operators: &[i64]) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let serialized = serde_json::to_string_pretty(operators)?;
        let temp = self.temp_path();
        fs::write(&temp, serialized).await?;
        fs::rename(&temp, &self.path).await.map_err(|e| {
            FaqBotError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Volatile storage for development and tests
#[derive(Debug, Default)]
pub struct MemoryOperatorStorage {
    operators: Mutex<Vec<i64>>,
    saves: AtomicUsize,
}

impl MemoryOperatorStorage {
    pub fn new(initial: Vec<i64>) -> Self {
        Self {
            operators: Mutex::new(initial),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed `save` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OperatorStorage for MemoryOperatorStorage {
    async fn load(&self) -> Result<Vec<i64>> {
        Ok(self.operators.lock().await.clone())
    }

    async fn save(&self, operators: &[i64]) -> Result<()> {
        *self.operators.lock().await = operators.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn registry_with(ids: Vec<i64>) -> (OperatorRegistry, Arc<MemoryOperatorStorage>) {
        let storage = Arc::new(MemoryOperatorStorage::new(ids));
        let registry = OperatorRegistry::load(storage.clone()).await.unwrap();
        (registry, storage)
    }

    #[tokio::test]
    async fn test_add_and_query() {
        let (registry, storage) = registry_with(vec![1]).await;

        assert_eq!(registry.add_operator(2).await.unwrap(), OperatorChange::Applied);
        assert_eq!(registry.add_operator(2).await.unwrap(), OperatorChange::AlreadyPresent);
        assert!(registry.is_operator(2).await);
        assert_eq!(registry.list_operators().await, vec![1, 2]);

        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.load().await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_remove() {
        let (registry, storage) = registry_with(vec![1, 2, 3]).await;

        assert_eq!(registry.remove_operator(9).await.unwrap(), OperatorChange::NotPresent);
        assert_eq!(registry.remove_operator(2).await.unwrap(), OperatorChange::Applied);
        assert!(!registry.is_operator(2).await);
        assert_eq!(storage.load().await.unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_last_operator_is_kept() {
        let (registry, storage) = registry_with(vec![7]).await;

        assert_eq!(registry.remove_operator(7).await.unwrap(), OperatorChange::LastOperator);
        assert!(registry.is_operator(7).await);
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_only_when_empty() {
        let (registry, _) = registry_with(vec![]).await;
        assert_eq!(registry.bootstrap(&[5, 6, 5]).await.unwrap(), 2);
        assert_eq!(registry.list_operators().await, vec![5, 6]);

        assert_eq!(registry.bootstrap(&[8]).await.unwrap(), 0);
        assert_eq!(registry.list_operators().await, vec![5, 6]);
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("operators.json");
        let storage = Arc::new(JsonFileOperatorStorage::new(&path));

        assert!(storage.load().await.unwrap().is_empty());

        let registry = OperatorRegistry::load(storage.clone()).await.unwrap();
        let _ = registry.bootstrap(&[10]).await.unwrap();
        let _ = registry.add_operator(20).await.unwrap();

        let reloaded = OperatorRegistry::load(Arc::new(JsonFileOperatorStorage::new(&path)))
            .await
            .unwrap();
        assert_eq!(reloaded.list_operators().await, vec![10, 20]);

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<i64> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec![10, 20]);
        assert!(!storage.temp_path().exists());
    }

    #[tokio::test]
    async fn test_json_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("operators.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = JsonFileOperatorStorage::new(&path);
        assert!(matches!(storage.load().await, Err(FaqBotError::Serialization(_))));
    }
}
