use std::collections::HashMap;

use access_control_sdk::{RelationConfig, entity_types};
use parking_lot::RwLock;

/// Shared map from entity type to its relation config.
///
/// Collaborators register entries at any point, including after the
/// resolver's first call: lookups happen at call time, never against a boot
/// snapshot, so registration order between collaborators is a non-issue.
pub struct RelationRegistry {
    entries: RwLock<HashMap<String, RelationConfig>>,
}

impl RelationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registry pre-seeded with the platform's own bridged entity types:
    /// agencies and divisions, both resolved through the `branches` bridge
    /// table.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(RelationConfig {
            entity_type: entity_types::AGENCY.to_owned(),
            bridge_table: "branches".to_owned(),
            entity_column: "agency_id".to_owned(),
            tenant_column: "customer_id".to_owned(),
            cache_group: "staffgrid_relations".to_owned(),
            cache_ttl_secs: 12 * 60 * 60,
            filter_enabled: true,
        });
        registry.register(RelationConfig {
            entity_type: entity_types::DIVISION.to_owned(),
            bridge_table: "branches".to_owned(),
            entity_column: "division_id".to_owned(),
            tenant_column: "customer_id".to_owned(),
            cache_group: "staffgrid_relations".to_owned(),
            cache_ttl_secs: 12 * 60 * 60,
            filter_enabled: true,
        });
        registry
    }

    /// Merge one entry into the registry.
    ///
    /// Registering an entity type twice overwrites the earlier entry: last
    /// write wins. This is deliberate: collaborators must be able to refine
    /// a default config without coordinating load order.
    pub fn register(&self, config: RelationConfig) {
        let mut entries = self.entries.write();
        if let Some(previous) = entries.insert(config.entity_type.clone(), config) {
            tracing::debug!(
                entity_type = %previous.entity_type,
                "relation config overwritten by a later registration"
            );
        }
    }

    /// Config for one entity type, if registered.
    #[must_use]
    pub fn get(&self, entity_type: &str) -> Option<RelationConfig> {
        self.entries.read().get(entity_type).cloned()
    }

    /// Registered entity types, sorted. Diagnostics only.
    #[must_use]
    pub fn entity_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.entries.read().keys().cloned().collect();
        types.sort();
        types
    }
}

impl Default for RelationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
