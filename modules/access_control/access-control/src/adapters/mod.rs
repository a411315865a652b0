//! Access filter adapters, one per consuming list surface.
//!
//! Each adapter is a pure transformation over the query's `Condition` tree:
//! it appends predicates and nothing else, is idempotent under
//! AND-composition (applying it twice matches the same rows as applying it
//! once), and always qualifies columns with the caller-supplied table
//! alias, since the same entity is queried under different aliases on
//! different surfaces.
//!
//! Role nuance is classified here by probing the hierarchy directly:
//! ownership of a customer makes the caller tenant-wide, an employee row
//! makes it division-scoped. Only the tenant-wide path delegates to the
//! [`RelationResolver`](crate::domain::resolver::RelationResolver) for the
//! coarse per-entity-type decision.

mod agencies;
mod branches;
mod bridged;
mod customers;
mod divisions;
mod employees;
mod predicate;

#[cfg(test)]
mod filter_test;

pub use agencies::AgencyListFilter;
pub use branches::BranchListFilter;
pub use customers::CustomerListFilter;
pub use divisions::DivisionListFilter;
pub use employees::EmployeeListFilter;
pub use predicate::{decision_condition, deny_all, single_id};

use async_trait::async_trait;
use sea_orm::Condition;
use staffgrid_security::UserContext;

/// Pure `Condition` transformation applied by a list query right before
/// execution.
#[async_trait]
pub trait ListFilter: Send + Sync {
    /// Append this surface's access predicate to `cond`, qualifying columns
    /// with `alias`.
    async fn apply(&self, cond: Condition, ctx: &UserContext, alias: &str) -> Condition;
}
