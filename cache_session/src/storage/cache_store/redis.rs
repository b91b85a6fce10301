use async_trait::async_trait;
use redis::{self, AsyncCommands};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, RedisCacheStore};

const CACHE_PREFIX: &str = "cache";

impl RedisCacheStore {
    /// Create a store for `url` with keys namespaced under `prefix`.
    pub fn new(url: &str, prefix: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            prefix: prefix.to_string(),
            ttl: None,
        })
    }

    /// Let redis expire entries `ttl` seconds after their last write.
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = (ttl > 0).then_some(ttl);
        self
    }

    fn make_key(&self, key: &str) -> String {
        format!("{CACHE_PREFIX}:{}:{key}", self.prefix)
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        // Verify the connection works
        let _conn = self.client.get_multiplexed_async_connection().await?;
        Ok(())
    }

    async fn put(&self, key: &str, value: CacheData) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = self.make_key(key);
        let value = serde_json::to_string(&value)?;
        match self.ttl {
            Some(ttl) => {
                let _: () = conn.set_ex(&key, value, ttl).await?;
            }
            None => {
                let _: () = conn.set(&key, value).await?;
            }
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<CacheData>, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = self.make_key(key);
        let value: Option<String> = conn.get(&key).await?;

        match value {
            Some(v) => Ok(Some(serde_json::from_str(&v)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = self.make_key(key);
        let _: () = conn.del(&key).await?;
        Ok(())
    }
}
