use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use staffgrid_security::{AccessDecision, UserContext};
use uuid::Uuid;

use crate::error::CacheError;

/// Key/value cache backend port.
///
/// Implementations are external services (or in-process stand-ins) with
/// plain get/set/delete/expire semantics. There is **no** group-wildcard
/// deletion: group clearing is emulated above this trait by the entity
/// cache managers, which track the keys they own.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch a value. `Ok(None)` is a miss.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot answer; callers treat it as
    /// a miss.
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, CacheError>;

    /// Store a value with a per-entry TTL.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry could not be stored; callers drop the
    /// write.
    async fn set(
        &self,
        namespace: &str,
        key: &str,
        value: Value,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    /// Delete a single key. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached; the entry then
    /// lives on until its TTL.
    async fn delete(&self, namespace: &str, key: &str) -> Result<(), CacheError>;
}

/// Resolution surface consumed by the access filter adapters and any other
/// collaborator that needs a coarse per-entity-type decision.
#[async_trait]
pub trait AccessResolverApi: Send + Sync {
    /// Compute the caller's access decision for `entity_type`.
    ///
    /// Infallible by contract: callers are mid-way through building a query
    /// and expect a decision value. Data-access failures degrade to
    /// [`AccessDecision::Blocked`]; cache failures degrade to
    /// recomputation.
    async fn resolve(&self, ctx: &UserContext, entity_type: &str) -> AccessDecision;
}

/// Invalidation triggers called by CRUD services immediately after each
/// hierarchy mutation.
///
/// All methods are idempotent and fire-and-forget: a failed delete leaves a
/// stale entry until its TTL and is never surfaced to the mutation that
/// triggered it. Calling them against a cold cache is a no-op.
#[async_trait]
pub trait CacheInvalidationApi: Send + Sync {
    /// Invalidate caches after a branch row was created, updated or
    /// deleted.
    async fn branch_mutated(&self, branch_id: Uuid, customer_id: Option<Uuid>);

    /// Invalidate caches after an employee row was created, updated or
    /// deleted.
    async fn employee_mutated(&self, employee_id: Uuid, customer_id: Option<Uuid>);

    /// Drop every per-customer collection entry for one customer.
    async fn customer_collections_changed(&self, customer_id: Uuid);
}
