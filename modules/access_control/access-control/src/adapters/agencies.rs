use std::sync::Arc;

use access_control_sdk::entity_types;
use agency_sdk::AgencyDirectoryClient;
use async_trait::async_trait;
use sea_orm::Condition;
use staffgrid_security::UserContext;

use crate::adapters::ListFilter;
use crate::adapters::bridged::BridgedListFilter;
use crate::domain::repo::DirectoryRepository;
use crate::domain::resolver::RelationResolver;

/// Filter for the agency list surface.
pub struct AgencyListFilter {
    inner: BridgedListFilter,
}

impl AgencyListFilter {
    #[must_use]
    pub fn new(
        resolver: Arc<RelationResolver>,
        directory: Arc<dyn DirectoryRepository>,
        agency: Arc<dyn AgencyDirectoryClient>,
    ) -> Self {
        Self {
            inner: BridgedListFilter::new(
                entity_types::AGENCY,
                "id",
                |bridge| bridge.agency_id,
                resolver,
                directory,
                agency,
            ),
        }
    }
}

#[async_trait]
impl ListFilter for AgencyListFilter {
    async fn apply(&self, cond: Condition, ctx: &UserContext, alias: &str) -> Condition {
        self.inner.apply(cond, ctx, alias).await
    }
}
