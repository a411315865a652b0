//! Local (in-process) client for the relation resolver.

use std::sync::Arc;

use access_control_sdk::AccessResolverApi;
use async_trait::async_trait;
use staffgrid_security::{AccessDecision, UserContext};

use crate::domain::resolver::RelationResolver;

/// [`AccessResolverApi`] implementation handed to collaborators that only
/// depend on the SDK.
pub struct AccessResolverLocalClient {
    resolver: Arc<RelationResolver>,
}

impl AccessResolverLocalClient {
    #[must_use]
    pub fn new(resolver: Arc<RelationResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl AccessResolverApi for AccessResolverLocalClient {
    async fn resolve(&self, ctx: &UserContext, entity_type: &str) -> AccessDecision {
        self.resolver.resolve(ctx, entity_type).await
    }
}
