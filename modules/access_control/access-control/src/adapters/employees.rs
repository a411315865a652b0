use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::Condition;
use staffgrid_security::{Role, UserContext};

use crate::adapters::ListFilter;
use crate::adapters::predicate::{deny_all, single_id};
use crate::domain::repo::DirectoryRepository;

/// Filter for the employees list.
///
/// The customer owner sees every employee of the customer; a branch admin
/// sees their branch; plain staff see only their own record.
pub struct EmployeeListFilter {
    directory: Arc<dyn DirectoryRepository>,
}

impl EmployeeListFilter {
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryRepository>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ListFilter for EmployeeListFilter {
    async fn apply(&self, cond: Condition, ctx: &UserContext, alias: &str) -> Condition {
        if ctx.is_administrator() {
            return cond;
        }

        let owner = match self.directory.customer_owned_by(ctx.subject_id()).await {
            Ok(owner) => owner,
            Err(error) => {
                tracing::error!(
                    user_id = %ctx.subject_id(),
                    error = ?error,
                    "ownership probe failed, hiding all rows"
                );
                return cond.add(deny_all());
            }
        };
        if let Some(customer_id) = owner {
            return cond.add(single_id(alias, "customer_id", customer_id));
        }

        let employee = match self.directory.employee_for_user(ctx.subject_id()).await {
            Ok(employee) => employee,
            Err(error) => {
                tracing::error!(
                    user_id = %ctx.subject_id(),
                    error = ?error,
                    "employee probe failed, hiding all rows"
                );
                return cond.add(deny_all());
            }
        };
        let Some(employee) = employee else {
            return cond;
        };

        if ctx.has_role(Role::BranchAdmin) {
            cond.add(single_id(alias, "branch_id", employee.branch_id))
        } else {
            cond.add(single_id(alias, "id", employee.id))
        }
    }
}
