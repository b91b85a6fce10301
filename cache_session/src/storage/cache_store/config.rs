use std::{env, sync::Arc, sync::LazyLock};

use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};

pub static SESSION_CACHE_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_CACHE_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

pub static SESSION_CACHE_STORE_URL: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("SESSION_CACHE_STORE_URL").ok());

pub static SESSION_CACHE_KEY_PREFIX: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_CACHE_KEY_PREFIX").unwrap_or_else(|_| "session".to_string())
});

pub static SESSION_CACHE_TTL: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_CACHE_TTL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
});

/// Build the cache store selected by `SESSION_CACHE_STORE_TYPE` and verify it is reachable.
pub async fn cache_store_from_env() -> Result<Arc<dyn CacheStore>, StorageError> {
    build_cache_store(
        SESSION_CACHE_STORE_TYPE.as_str(),
        SESSION_CACHE_STORE_URL.as_deref(),
        SESSION_CACHE_KEY_PREFIX.as_str(),
        *SESSION_CACHE_TTL,
    )
    .await
}

pub(super) async fn build_cache_store(
    store_type: &str,
    store_url: Option<&str>,
    key_prefix: &str,
    ttl: u64,
) -> Result<Arc<dyn CacheStore>, StorageError> {
    tracing::info!("Initializing session cache store with type: {}", store_type);

    let store: Arc<dyn CacheStore> = match store_type {
        "memory" => Arc::new(InMemoryCacheStore::new()),
        "redis" => {
            let url = store_url.ok_or_else(|| {
                StorageError::Config(
                    "SESSION_CACHE_STORE_URL must be set for the redis store".to_string(),
                )
            })?;
            Arc::new(RedisCacheStore::new(url, key_prefix)?.with_ttl(ttl))
        }
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    if let Err(e) = store.init().await {
        tracing::error!("Failed to initialize session cache store: {}", e);
        return Err(e);
    }

    tracing::info!("Connected to session cache store: type={}", store_type);
    Ok(store)
}
