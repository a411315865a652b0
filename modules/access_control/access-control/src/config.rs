use std::time::Duration;

use serde::Deserialize;

/// Tuning knobs for the access-control core.
///
/// TTLs default to the volatility observed in production: branches change
/// rarely (6 h), employees churn with onboarding (1 h). Relation decisions
/// carry their TTL in each [`access_control_sdk::RelationConfig`].
#[derive(Clone, Debug, Deserialize)]
pub struct AccessControlConfig {
    /// TTL in seconds for cached branch entities and collections.
    #[serde(default = "default_branch_cache_ttl_secs")]
    pub branch_cache_ttl_secs: u64,

    /// TTL in seconds for cached employee entities and collections.
    #[serde(default = "default_employee_cache_ttl_secs")]
    pub employee_cache_ttl_secs: u64,
}

impl AccessControlConfig {
    #[must_use]
    pub fn branch_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.branch_cache_ttl_secs)
    }

    #[must_use]
    pub fn employee_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.employee_cache_ttl_secs)
    }
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            branch_cache_ttl_secs: default_branch_cache_ttl_secs(),
            employee_cache_ttl_secs: default_employee_cache_ttl_secs(),
        }
    }
}

fn default_branch_cache_ttl_secs() -> u64 {
    6 * 60 * 60
}

fn default_employee_cache_ttl_secs() -> u64 {
    60 * 60
}
