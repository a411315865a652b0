use access_control_sdk::RelationConfig;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::model::{BranchBridge, EmployeeRecord};

/// Read-only probes over the persisted hierarchy.
///
/// The rows are owned and mutated by the CRUD services; this core only ever
/// reads them. Decisions derived from these probes are a pure function of
/// the rows at resolution time.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Employee row bridged to `user_id`, if any.
    async fn employee_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<EmployeeRecord>>;

    /// Customer owned by `user_id` (the tenant-admin association), if any.
    async fn customer_owned_by(&self, user_id: Uuid) -> anyhow::Result<Option<Uuid>>;

    /// Customer the user belongs to: the employee row wins, ownership is
    /// the fallback.
    async fn customer_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<Uuid>>;

    /// Bridge values of one branch.
    async fn branch_bridge(&self, branch_id: Uuid) -> anyhow::Result<Option<BranchBridge>>;
}

/// Distinct-id queries over the bridge tables described by relation
/// configs.
#[async_trait]
pub trait BridgeRepository: Send + Sync {
    /// Distinct non-null `entity_column` values of `config.bridge_table`
    /// scoped to `customer_id`.
    async fn distinct_entity_ids(
        &self,
        config: &RelationConfig,
        customer_id: Uuid,
    ) -> anyhow::Result<Vec<Uuid>>;
}
