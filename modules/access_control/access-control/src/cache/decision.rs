use std::collections::HashSet;
use std::sync::Arc;

use access_control_sdk::{CacheBackend, RelationConfig};
use dashmap::DashMap;
use staffgrid_security::AccessDecision;
use uuid::Uuid;

/// Cache for resolver decisions, keyed `(entity_type, user_id)` and
/// namespaced by each relation config's cache group.
///
/// Like [`super::EntityCache`] it tracks the keys it writes so that "a
/// relation set may have changed" invalidations can drop every cached
/// decision without backend wildcard support. Failures degrade to misses.
pub struct DecisionCache {
    backend: Arc<dyn CacheBackend>,
    /// cache group → decision keys written by this process.
    tracked: DashMap<String, HashSet<String>>,
}

impl DecisionCache {
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            tracked: DashMap::new(),
        }
    }

    fn key(entity_type: &str, user_id: Uuid) -> String {
        format!("decision:{entity_type}:{user_id}")
    }

    /// Cached decision for `(config.entity_type, user_id)`, if present.
    pub async fn get(&self, config: &RelationConfig, user_id: Uuid) -> Option<AccessDecision> {
        let key = Self::key(&config.entity_type, user_id);
        match self.backend.get(&config.cache_group, &key).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(decision) => Some(decision),
                Err(error) => {
                    tracing::warn!(
                        cache_group = %config.cache_group,
                        key,
                        error = %error,
                        "cached decision failed to decode, treating as miss"
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(
                    cache_group = %config.cache_group,
                    key,
                    error = %error,
                    "decision cache read failed, treating as miss"
                );
                None
            }
        }
    }

    /// Store a decision with the config's TTL.
    pub async fn set(&self, config: &RelationConfig, user_id: Uuid, decision: &AccessDecision) {
        let encoded = match serde_json::to_value(decision) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::warn!(error = %error, "decision failed to encode, not cached");
                return;
            }
        };

        let key = Self::key(&config.entity_type, user_id);
        match self
            .backend
            .set(&config.cache_group, &key, encoded, config.cache_ttl())
            .await
        {
            Ok(()) => {
                self.tracked
                    .entry(config.cache_group.clone())
                    .or_default()
                    .insert(key);
            }
            Err(error) => {
                tracing::warn!(
                    cache_group = %config.cache_group,
                    key,
                    error = %error,
                    "decision cache write failed, entry dropped"
                );
            }
        }
    }

    /// Drop every cached decision this process wrote, across every cache
    /// group. Called whenever a hierarchy mutation may have changed a
    /// relation set.
    pub async fn clear(&self) {
        let groups: Vec<String> = self.tracked.iter().map(|entry| entry.key().clone()).collect();
        for group in groups {
            let Some((group, keys)) = self.tracked.remove(&group) else {
                continue;
            };
            for key in keys {
                if let Err(error) = self.backend.delete(&group, &key).await {
                    tracing::warn!(
                        cache_group = %group,
                        key,
                        error = %error,
                        "decision clear skipped a key, entry expires by TTL"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moka_cache_plugin::MokaCacheBackend;

    fn config() -> RelationConfig {
        RelationConfig {
            entity_type: "agency".to_owned(),
            bridge_table: "branches".to_owned(),
            entity_column: "agency_id".to_owned(),
            tenant_column: "customer_id".to_owned(),
            cache_group: "staffgrid_relations".to_owned(),
            cache_ttl_secs: 60,
            filter_enabled: true,
        }
    }

    #[tokio::test]
    async fn round_trip_and_clear() {
        let cache = DecisionCache::new(Arc::new(MokaCacheBackend::default()));
        let config = config();
        let user = Uuid::new_v4();
        let decision = AccessDecision::restricted_to([Uuid::from_u128(10)]);

        assert!(cache.get(&config, user).await.is_none());

        cache.set(&config, user, &decision).await;
        assert_eq!(cache.get(&config, user).await, Some(decision));

        cache.clear().await;
        assert!(cache.get(&config, user).await.is_none());

        // Clearing again on a cold cache is a no-op.
        cache.clear().await;
    }

    #[tokio::test]
    async fn blocked_is_a_cacheable_decision() {
        let cache = DecisionCache::new(Arc::new(MokaCacheBackend::default()));
        let config = config();
        let user = Uuid::new_v4();

        cache.set(&config, user, &AccessDecision::Blocked).await;
        assert_eq!(
            cache.get(&config, user).await,
            Some(AccessDecision::Blocked),
            "an explicit no-access result must round-trip"
        );
    }
}
