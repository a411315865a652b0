//! `SeaORM` implementation of the hierarchy probes.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::model::{BranchBridge, EmployeeRecord};
use crate::domain::repo::DirectoryRepository;

use super::entity::{branch, customer, employee};

/// Read-only probes over the `customers` / `branches` / `employees`
/// tables.
pub struct SeaOrmDirectoryRepository {
    conn: DatabaseConnection,
}

impl SeaOrmDirectoryRepository {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl DirectoryRepository for SeaOrmDirectoryRepository {
    async fn employee_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<EmployeeRecord>> {
        let employee = employee::Entity::find()
            .filter(employee::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?;

        Ok(employee.map(EmployeeRecord::from))
    }

    async fn customer_owned_by(&self, user_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let owned = customer::Entity::find()
            .filter(customer::Column::OwnerUserId.eq(user_id))
            .one(&self.conn)
            .await?;

        Ok(owned.map(|customer| customer.id))
    }

    async fn customer_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        if let Some(employee) = self.employee_for_user(user_id).await? {
            return Ok(Some(employee.customer_id));
        }
        self.customer_owned_by(user_id).await
    }

    async fn branch_bridge(&self, branch_id: Uuid) -> anyhow::Result<Option<BranchBridge>> {
        let branch = branch::Entity::find_by_id(branch_id).one(&self.conn).await?;

        Ok(branch.map(BranchBridge::from))
    }
}
