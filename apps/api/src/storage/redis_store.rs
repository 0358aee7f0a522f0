use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::info;

use crate::models::resume::ResumeRecord;
use crate::storage::{decode, validate_key, RecordStore, StorageError};

/// Stores the record as a JSON string under a Redis key.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
    prefix: String,
}

impl RedisStore {
    /// Opens a client and checks the server is reachable.
    pub async fn connect(redis_url: &str) -> Result<Self, StorageError> {
        info!("Connecting to Redis...");
        let client = redis::Client::open(redis_url)?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        info!("Redis connection established");

        Ok(Self {
            client,
            prefix: "resume-builder:".to_string(),
        })
    }

    fn redis_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn load(&self, key: &str) -> Result<Option<ResumeRecord>, StorageError> {
        validate_key(key)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(self.redis_key(key)).await?;
        raw.map(|raw| decode(key, &raw)).transpose()
    }

    async fn save(&self, key: &str, record: &ResumeRecord) -> Result<(), StorageError> {
        validate_key(key)?;
        let raw = serde_json::to_string(record)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(self.redis_key(key), raw).await?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(self.redis_key(key)).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
