use async_trait::async_trait;
use cache_session::{CacheData, CacheStore, InMemoryCacheStore, StorageError};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    Get(String),
    Put(String),
    Remove(String),
}

/// In-memory store that also records every operation in call order
#[derive(Default)]
pub struct RecordingCacheStore {
    inner: InMemoryCacheStore,
    ops: Mutex<Vec<CacheOp>>,
}

impl RecordingCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<CacheOp> {
        self.ops.lock().expect("ops lock").clone()
    }

    pub fn count(&self, matches: impl Fn(&CacheOp) -> bool) -> usize {
        self.ops().iter().filter(|op| matches(op)).count()
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    fn record(&self, op: CacheOp) {
        self.ops.lock().expect("ops lock").push(op);
    }
}

#[async_trait]
impl CacheStore for RecordingCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        self.inner.init().await
    }

    async fn put(&self, key: &str, value: CacheData) -> Result<(), StorageError> {
        self.record(CacheOp::Put(key.to_string()));
        self.inner.put(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<CacheData>, StorageError> {
        self.record(CacheOp::Get(key.to_string()));
        self.inner.get(key).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.record(CacheOp::Remove(key.to_string()));
        self.inner.remove(key).await
    }
}

/// Store whose every operation fails with `message`
pub struct FailingCacheStore {
    message: String,
}

impl FailingCacheStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Err(StorageError::Storage(self.message.clone()))
    }

    async fn put(&self, _key: &str, _value: CacheData) -> Result<(), StorageError> {
        Err(StorageError::Storage(self.message.clone()))
    }

    async fn get(&self, _key: &str) -> Result<Option<CacheData>, StorageError> {
        Err(StorageError::Storage(self.message.clone()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Storage(self.message.clone()))
    }
}
