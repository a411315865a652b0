use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use access_control_sdk::CacheBackend;
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// One cache group: a namespace, a default TTL, and the enumerated set of
/// key-type prefixes it owns.
///
/// Every failure on the backend degrades: a failed read is a miss, a failed
/// write is a dropped entry, a failed delete leaves the entry to its TTL.
/// None of them reach the caller.
pub struct EntityCache {
    backend: Arc<dyn CacheBackend>,
    namespace: &'static str,
    default_ttl: Duration,
    prefixes: &'static [&'static str],
    /// Keys written by this process, per key-type prefix. The backend has
    /// no wildcard deletion, so group clears iterate this index.
    tracked: DashMap<&'static str, HashSet<String>>,
}

impl EntityCache {
    #[must_use]
    pub fn new(
        backend: Arc<dyn CacheBackend>,
        namespace: &'static str,
        default_ttl: Duration,
        prefixes: &'static [&'static str],
    ) -> Self {
        Self {
            backend,
            namespace,
            default_ttl,
            prefixes,
            tracked: DashMap::new(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    #[must_use]
    pub fn prefixes(&self) -> &'static [&'static str] {
        self.prefixes
    }

    fn owned_prefix(&self, prefix: &str) -> Option<&'static str> {
        self.prefixes.iter().copied().find(|p| *p == prefix)
    }

    fn compose(prefix: &str, suffix: &str) -> String {
        format!("{prefix}:{suffix}")
    }

    /// Fetch and decode one entry. Any backend or decode failure is a miss.
    pub async fn get<T: DeserializeOwned>(&self, prefix: &str, suffix: &str) -> Option<T> {
        let key = Self::compose(prefix, suffix);
        match self.backend.get(self.namespace, &key).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(decoded) => Some(decoded),
                Err(error) => {
                    tracing::warn!(
                        namespace = self.namespace,
                        key,
                        error = %error,
                        "cached value failed to decode, treating as miss"
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(
                    namespace = self.namespace,
                    key,
                    error = %error,
                    "cache read failed, treating as miss"
                );
                None
            }
        }
    }

    /// Encode and store one entry under an owned prefix.
    ///
    /// `ttl` falls back to the group default. Writes under a prefix the
    /// group does not own are refused so that group clears stay exhaustive.
    pub async fn set<T: Serialize>(
        &self,
        prefix: &str,
        suffix: &str,
        value: &T,
        ttl: Option<Duration>,
    ) {
        let Some(prefix) = self.owned_prefix(prefix) else {
            tracing::warn!(
                namespace = self.namespace,
                prefix,
                "refusing cache write under a prefix this group does not own"
            );
            return;
        };

        let encoded = match serde_json::to_value(value) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::warn!(
                    namespace = self.namespace,
                    prefix,
                    error = %error,
                    "cache value failed to encode, entry dropped"
                );
                return;
            }
        };

        let key = Self::compose(prefix, suffix);
        match self
            .backend
            .set(
                self.namespace,
                &key,
                encoded,
                ttl.unwrap_or(self.default_ttl),
            )
            .await
        {
            Ok(()) => {
                self.tracked.entry(prefix).or_default().insert(key);
            }
            Err(error) => {
                tracing::warn!(
                    namespace = self.namespace,
                    key,
                    error = %error,
                    "cache write failed, entry dropped"
                );
            }
        }
    }

    /// Delete one entry. Safe against a cold cache.
    pub async fn delete(&self, prefix: &str, suffix: &str) {
        let key = Self::compose(prefix, suffix);
        if let Err(error) = self.backend.delete(self.namespace, &key).await {
            tracing::warn!(
                namespace = self.namespace,
                key,
                error = %error,
                "cache delete failed, entry expires by TTL"
            );
        }
        if let Some(mut keys) = self.tracked.get_mut(prefix) {
            keys.remove(&key);
        }
    }

    /// Clear every tracked key under one key-type prefix.
    pub async fn clear_prefix(&self, prefix: &str) {
        let Some((prefix, keys)) = self.tracked.remove(prefix) else {
            return;
        };
        for key in keys {
            if let Err(error) = self.backend.delete(self.namespace, &key).await {
                tracing::warn!(
                    namespace = self.namespace,
                    prefix,
                    key,
                    error = %error,
                    "cache clear skipped a key, entry expires by TTL"
                );
            }
        }
    }

    /// Clear tracked keys under `prefix` whose suffix starts with
    /// `suffix_prefix`. Used for per-customer collections.
    pub async fn clear_matching(&self, prefix: &str, suffix_prefix: &str) {
        let pattern = Self::compose(prefix, suffix_prefix);
        let matching: Vec<String> = self
            .tracked
            .get(prefix)
            .map(|keys| {
                keys.iter()
                    .filter(|key| key.starts_with(&pattern))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for key in matching {
            if let Err(error) = self.backend.delete(self.namespace, &key).await {
                tracing::warn!(
                    namespace = self.namespace,
                    key,
                    error = %error,
                    "cache clear skipped a key, entry expires by TTL"
                );
            }
            if let Some(mut keys) = self.tracked.get_mut(prefix) {
                keys.remove(&key);
            }
        }
    }

    /// Clear everything this group owns.
    pub async fn clear_all(&self) {
        for prefix in self.prefixes {
            self.clear_prefix(prefix).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::key_types;
    use moka_cache_plugin::MokaCacheBackend;
    use std::time::Duration;

    fn cache() -> EntityCache {
        crate::cache::branch_cache(
            Arc::new(MokaCacheBackend::default()),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn round_trip_until_delete() {
        let cache = cache();

        cache
            .set(key_types::BRANCH, "b1", &"North".to_owned(), None)
            .await;
        let value: Option<String> = cache.get(key_types::BRANCH, "b1").await;
        assert_eq!(value.as_deref(), Some("North"));

        cache.delete(key_types::BRANCH, "b1").await;
        let value: Option<String> = cache.get(key_types::BRANCH, "b1").await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn clear_prefix_only_touches_that_prefix() {
        let cache = cache();

        cache.set(key_types::BRANCH, "b1", &1_u32, None).await;
        cache.set(key_types::LIST, "page:1", &vec![1_u32], None).await;
        cache.set(key_types::LIST, "page:2", &vec![2_u32], None).await;

        cache.clear_prefix(key_types::LIST).await;

        let entity: Option<u32> = cache.get(key_types::BRANCH, "b1").await;
        let page1: Option<Vec<u32>> = cache.get(key_types::LIST, "page:1").await;
        let page2: Option<Vec<u32>> = cache.get(key_types::LIST, "page:2").await;
        assert_eq!(entity, Some(1));
        assert!(page1.is_none());
        assert!(page2.is_none());
    }

    #[tokio::test]
    async fn clear_matching_scopes_to_one_customer() {
        let cache = cache();

        cache
            .set(key_types::CUSTOMER, "5:branches", &vec![1_u32], None)
            .await;
        cache
            .set(key_types::CUSTOMER, "6:branches", &vec![2_u32], None)
            .await;

        cache.clear_matching(key_types::CUSTOMER, "5:").await;

        let five: Option<Vec<u32>> = cache.get(key_types::CUSTOMER, "5:branches").await;
        let six: Option<Vec<u32>> = cache.get(key_types::CUSTOMER, "6:branches").await;
        assert!(five.is_none());
        assert_eq!(six, Some(vec![2]));
    }

    #[tokio::test]
    async fn writes_under_foreign_prefixes_are_refused() {
        let cache = cache();

        cache.set("decision", "agency:42", &1_u32, None).await;
        let value: Option<u32> = cache.get("decision", "agency:42").await;
        assert!(value.is_none(), "foreign prefix must not be written");
    }

    #[tokio::test]
    async fn clears_are_idempotent_and_cold_safe() {
        let cache = cache();

        // Nothing written yet; none of these may panic or error.
        cache.clear_all().await;
        cache.delete(key_types::BRANCH, "absent").await;
        cache.clear_matching(key_types::CUSTOMER, "5:").await;

        cache.set(key_types::BRANCH, "b1", &1_u32, None).await;
        cache.clear_all().await;
        cache.clear_all().await;

        let value: Option<u32> = cache.get(key_types::BRANCH, "b1").await;
        assert!(value.is_none());
    }
}
