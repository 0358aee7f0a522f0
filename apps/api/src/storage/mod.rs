//! Persistence for the single saved resume.
//!
//! A store maps a key to the JSON serialization of a `ResumeRecord`, mirroring
//! the one-key client storage the form writes to. `AppState` holds an
//! `Arc<dyn RecordStore>`, chosen at startup from config.

pub mod file;
#[cfg(test)]
pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::resume::ResumeRecord;

pub use self::file::FileStore;
#[cfg(test)]
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),

    #[error("Stored record under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Key-value persistence for resume records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the record under `key`, or `None` when nothing has been saved.
    async fn load(&self, key: &str) -> Result<Option<ResumeRecord>, StorageError>;

    /// Replaces whatever is stored under `key`.
    async fn save(&self, key: &str, record: &ResumeRecord) -> Result<(), StorageError>;

    /// Removes the record under `key`. Clearing a missing key is not an error.
    async fn clear(&self, key: &str) -> Result<(), StorageError>;

    /// Backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Keys end up in file names and Redis keys, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

pub(crate) fn decode(key: &str, raw: &str) -> Result<ResumeRecord, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })
}
