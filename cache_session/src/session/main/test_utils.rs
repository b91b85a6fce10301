//! Test utilities for session module tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::session::errors::SessionError;
use crate::storage::{CacheData, CacheStore, StorageError};

use super::id::SessionIdGenerator;

/// Deterministic generator handing out `id-1`, `id-2`, ...
#[derive(Debug, Default)]
pub(crate) struct SequentialIds {
    next: AtomicUsize,
}

impl SequentialIds {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl SessionIdGenerator for SequentialIds {
    fn generate(&self) -> Result<String, SessionError> {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("id-{n}"))
    }
}

/// Cache store whose every operation fails with the same message.
pub(crate) struct FailingCacheStore {
    message: String,
}

impl FailingCacheStore {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn fail<T>(&self) -> Result<T, StorageError> {
        Err(StorageError::Storage(self.message.clone()))
    }
}

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        self.fail()
    }

    async fn put(&self, _key: &str, _value: CacheData) -> Result<(), StorageError> {
        self.fail()
    }

    async fn get(&self, _key: &str) -> Result<Option<CacheData>, StorageError> {
        self.fail()
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        self.fail()
    }
}
