use std::sync::Arc;

use agency_sdk::AgencyDirectoryClient;
use async_trait::async_trait;
use sea_orm::Condition;
use staffgrid_security::{Role, UserContext};

use crate::adapters::ListFilter;
use crate::adapters::predicate::{deny_all, single_id};
use crate::domain::repo::DirectoryRepository;

/// Filter for the branches list.
///
/// The customer owner sees every branch of the customer; an employee
/// (branch admin or not) sees their own branch; agency staff see the
/// branches bridged to their agency, when the integration is installed.
pub struct BranchListFilter {
    directory: Arc<dyn DirectoryRepository>,
    agency: Arc<dyn AgencyDirectoryClient>,
}

impl BranchListFilter {
    #[must_use]
    pub fn new(
        directory: Arc<dyn DirectoryRepository>,
        agency: Arc<dyn AgencyDirectoryClient>,
    ) -> Self {
        Self { directory, agency }
    }
}

#[async_trait]
impl ListFilter for BranchListFilter {
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
        if let Some(employee) = employee {
            return cond.add(single_id(alias, "id", employee.branch_id));
        }

        // External agency staff see the branches bridged to their agency.
        if ctx.has_role(Role::AgencyStaff) && self.agency.is_available() {
            match self.agency.agency_of_user(ctx, ctx.subject_id()).await {
                Ok(Some(agency)) => {
                    return cond.add(single_id(alias, "agency_id", agency.id));
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!(
                        user_id = %ctx.subject_id(),
                        error = %error,
                        "agency probe failed, contributing no predicate"
                    );
                }
            }
        }

        cond
    }
}
