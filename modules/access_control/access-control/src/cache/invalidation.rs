use std::sync::Arc;

use access_control_sdk::CacheInvalidationApi;
use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::{DecisionCache, EntityCache, key_types};

/// Invalidation triggers called by CRUD services after each hierarchy
/// mutation.
///
/// For an entity `I` owned by customer `C`, one call drops `I`'s entity
/// entry, every list/count entry that could contain `I`, every cached
/// relation decision (a bridge value may have changed), and, when `C` is
/// known, `C`'s per-customer collections. Everything is best-effort: a
/// failed delete leaves a stale entry until its TTL and never reaches the
/// mutation that triggered the call.
pub struct InvalidationService {
    branches: Arc<EntityCache>,
    employees: Arc<EntityCache>,
    decisions: Arc<DecisionCache>,
}

impl InvalidationService {
    #[must_use]
    pub fn new(
        branches: Arc<EntityCache>,
        employees: Arc<EntityCache>,
        decisions: Arc<DecisionCache>,
    ) -> Self {
        Self {
            branches,
            employees,
            decisions,
        }
    }

    async fn entity_mutated(
        &self,
        cache: &EntityCache,
        entity_prefix: &str,
        entity_id: Uuid,
        customer_id: Option<Uuid>,
    ) {
        cache.delete(entity_prefix, &entity_id.to_string()).await;
        cache.clear_prefix(key_types::LIST).await;
        cache.clear_prefix(key_types::COUNT).await;

        // A mutated row may have changed a relation set; every cached
        // decision is suspect.
        self.decisions.clear().await;

        if let Some(customer_id) = customer_id {
            self.customer_collections_changed(customer_id).await;
        }
    }
}

#[async_trait]
impl CacheInvalidationApi for InvalidationService {
    async fn branch_mutated(&self, branch_id: Uuid, customer_id: Option<Uuid>) {
        tracing::debug!(%branch_id, ?customer_id, "invalidating branch caches");
        self.entity_mutated(&self.branches, key_types::BRANCH, branch_id, customer_id)
            .await;
    }

    async fn employee_mutated(&self, employee_id: Uuid, customer_id: Option<Uuid>) {
        tracing::debug!(%employee_id, ?customer_id, "invalidating employee caches");
        self.entity_mutated(&self.employees, key_types::EMPLOYEE, employee_id, customer_id)
            .await;
    }

    async fn customer_collections_changed(&self, customer_id: Uuid) {
        let scope = format!("{customer_id}:");
        self.branches.clear_matching(key_types::CUSTOMER, &scope).await;
        self.employees
            .clear_matching(key_types::CUSTOMER, &scope)
            .await;
    }
}
