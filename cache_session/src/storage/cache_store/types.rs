use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

/// Process-local cache backed by a `HashMap`.
///
/// Entries never expire. Meant for tests, demos and single-instance deployments.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    pub(super) entry: Mutex<HashMap<String, CacheData>>,
}

/// Redis-backed cache shared between server instances.
#[derive(Debug, Clone)]
pub struct RedisCacheStore {
    pub(super) client: redis::Client,
    pub(super) prefix: String,
    pub(super) ttl: Option<u64>,
}

/// Asynchronous key-value cache holding session contents keyed by session id.
///
/// Implementations must provide per-key atomicity for `get`, `put` and `remove`.
/// No multi-key transactions are required.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Put a value into the store, replacing any previous value for `key`.
    async fn put(&self, key: &str, value: CacheData) -> Result<(), StorageError>;

    /// Get a value from the store. A miss is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<CacheData>, StorageError>;

    /// Remove a value from the store. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
