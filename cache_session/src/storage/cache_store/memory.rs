use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, InMemoryCacheStore};

impl InMemoryCacheStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session cache store");
        Self {
            entry: Mutex::new(HashMap::new()),
        }
    }

    /// Number of entries currently held.
    pub async fn len(&self) -> usize {
        self.entry.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entry.lock().await.is_empty()
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.entry.lock().await.contains_key(key)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn put(&self, key: &str, value: CacheData) -> Result<(), StorageError> {
        self.entry.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<CacheData>, StorageError> {
        Ok(self.entry.lock().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entry.lock().await.remove(key);
        Ok(())
    }
}
