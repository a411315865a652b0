use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::Condition;
use staffgrid_security::UserContext;

use crate::adapters::ListFilter;
use crate::adapters::predicate::{deny_all, single_id};
use crate::domain::repo::DirectoryRepository;

/// Filter for the customers list: hierarchy members only ever see their own
/// customer row. Callers outside the hierarchy are not this filter's
/// concern.
pub struct CustomerListFilter {
    directory: Arc<dyn DirectoryRepository>,
}

impl CustomerListFilter {
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryRepository>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ListFilter for CustomerListFilter {
    async fn apply(&self, cond: Condition, ctx: &UserContext, alias: &str) -> Condition {
        if ctx.is_administrator() {
            return cond;
        }

        match self.directory.customer_for_user(ctx.subject_id()).await {
            Ok(Some(customer_id)) => cond.add(single_id(alias, "id", customer_id)),
            Ok(None) => cond,
            Err(error) => {
                tracing::error!(
                    user_id = %ctx.subject_id(),
                    error = ?error,
                    "customer probe failed, hiding all rows"
                );
                cond.add(deny_all())
            }
        }
    }
}
