use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::resume::ResumeRecord;
use crate::storage::{decode, validate_key, RecordStore, StorageError};

/// In-process store. Values are kept serialized so a load goes through the
/// same decode path as the persistent backends.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<ResumeRecord>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.read().await;
        entries.get(key).map(|raw| decode(key, raw)).transpose()
    }

    async fn save(&self, key: &str, record: &ResumeRecord) -> Result<(), StorageError> {
        validate_key(key)?;
        let raw = serde_json::to_string(record)?;
        self.entries.write().await.insert(key.to_string(), raw);
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.load("resumeData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryStore::new();
        let record = ResumeRecord::sample();
        store.save("resumeData", &record).await.unwrap();
        assert_eq!(store.load("resumeData").await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_save_replaces_wholesale() {
        let store = MemoryStore::new();
        store
            .save("resumeData", &ResumeRecord::sample())
            .await
            .unwrap();
        let small = ResumeRecord {
            name: "Ada".into(),
            ..Default::default()
        };
        store.save("resumeData", &small).await.unwrap();
        assert_eq!(store.load("resumeData").await.unwrap(), Some(small));
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let store = MemoryStore::new();
        store
            .save("resumeData", &ResumeRecord::sample())
            .await
            .unwrap();
        store.clear("resumeData").await.unwrap();
        store.clear("resumeData").await.unwrap();
        assert!(store.load("resumeData").await.unwrap().is_none());
    }
}
