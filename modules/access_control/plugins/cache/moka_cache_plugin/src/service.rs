//! Backend implementation over a moka future cache.

use std::time::{Duration, Instant};

use access_control_sdk::{CacheBackend, CacheError};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use serde_json::Value;

use crate::config::MokaCacheConfig;

/// One stored value together with the TTL it was written with.
#[derive(Clone)]
struct CachedEntry {
    value: Value,
    ttl: Duration,
}

/// Expiry policy that honors each entry's own TTL instead of a cache-wide
/// time-to-live. Overwrites restart the clock with the new entry's TTL.
struct PerEntryExpiry;

impl Expiry<String, CachedEntry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &CachedEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &CachedEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache backend with per-entry TTL.
pub struct MokaCacheBackend {
    cache: Cache<String, CachedEntry>,
}

impl MokaCacheBackend {
    /// Create a new backend with the given configuration.
    #[must_use]
    pub fn new(config: MokaCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(PerEntryExpiry)
            .build();

        Self { cache }
    }

    fn compose_key(namespace: &str, key: &str) -> String {
        format!("{namespace}:{key}")
    }
}

impl Default for MokaCacheBackend {
    fn default() -> Self {
        Self::new(MokaCacheConfig::default())
    }
}

#[async_trait]
impl CacheBackend for MokaCacheBackend {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, CacheError> {
        let entry = self.cache.get(&Self::compose_key(namespace, key)).await;
        Ok(entry.map(|e| e.value))
    }

    async fn set(
        &self,
        namespace: &str,
        key: &str,
        value: Value,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.cache
            .insert(Self::compose_key(namespace, key), CachedEntry { value, ttl })
            .await;
        Ok(())
    }

    async fn delete(&self, namespace: &str, key: &str) -> Result<(), CacheError> {
        self.cache
            .invalidate(&Self::compose_key(namespace, key))
            .await;
        Ok(())
    }
}
