use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Entity types registered by the platform itself. Collaborators may
/// register additional types under their own names.
pub mod entity_types {
    pub const AGENCY: &str = "agency";
    pub const DIVISION: &str = "division";
}

/// Declarative description of how accessible ids for one entity type are
/// computed from one bridge table.
///
/// Rows of `bridge_table` carry both a tenant-scoping column
/// (`tenant_column`) and the target entity's id column (`entity_column`);
/// the resolver selects the distinct non-null entity ids scoped to the
/// caller's customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationConfig {
    /// Registry key, e.g. [`entity_types::AGENCY`].
    pub entity_type: String,
    /// Table to resolve against, e.g. `branches`.
    pub bridge_table: String,
    /// Column holding the target entity's id, e.g. `agency_id`.
    pub entity_column: String,
    /// Column scoping rows to a customer, e.g. `customer_id`.
    pub tenant_column: String,
    /// Cache namespace for decisions of this entity type.
    pub cache_group: String,
    /// Decision TTL in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// When false the resolver leaves this entity type unrestricted.
    #[serde(default = "default_filter_enabled")]
    pub filter_enabled: bool,
}

fn default_cache_ttl_secs() -> u64 {
    12 * 60 * 60
}

fn default_filter_enabled() -> bool {
    true
}

impl RelationConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
