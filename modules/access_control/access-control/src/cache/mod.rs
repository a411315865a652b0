//! Cache managers and invalidation triggers.
//!
//! The backend behind [`access_control_sdk::CacheBackend`] only supports
//! get/set/delete on single keys, so group clearing is emulated here: each
//! manager declares the key-type prefixes it owns and tracks every key it
//! writes, and clears iterate the tracked keys. Entries written by other
//! processes stay bounded by their TTL.

mod decision;
mod invalidation;
mod manager;

pub use decision::DecisionCache;
pub use invalidation::InvalidationService;
pub use manager::EntityCache;

use std::sync::Arc;
use std::time::Duration;

use access_control_sdk::CacheBackend;

/// Key-type prefixes shared by the entity cache groups.
pub mod key_types {
    /// Single branch entity, keyed by branch id.
    pub const BRANCH: &str = "branch";
    /// Single employee entity, keyed by employee id.
    pub const EMPLOYEE: &str = "employee";
    /// Paginated or filtered list results.
    pub const LIST: &str = "list";
    /// Row counts for list surfaces.
    pub const COUNT: &str = "count";
    /// Per-customer collections, keyed `{customer_id}:{name}`.
    pub const CUSTOMER: &str = "customer";
}

/// Cache group for branch entities and collections.
#[must_use]
pub fn branch_cache(backend: Arc<dyn CacheBackend>, default_ttl: Duration) -> EntityCache {
    EntityCache::new(
        backend,
        "staffgrid_branches",
        default_ttl,
        &[
            key_types::BRANCH,
            key_types::LIST,
            key_types::COUNT,
            key_types::CUSTOMER,
        ],
    )
}

/// Cache group for employee entities and collections.
#[must_use]
pub fn employee_cache(backend: Arc<dyn CacheBackend>, default_ttl: Duration) -> EntityCache {
    EntityCache::new(
        backend,
        "staffgrid_employees",
        default_ttl,
        &[
            key_types::EMPLOYEE,
            key_types::LIST,
            key_types::COUNT,
            key_types::CUSTOMER,
        ],
    )
}
