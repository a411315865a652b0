use std::sync::Arc;

use staffgrid_security::{AccessDecision, UserContext};

use crate::cache::DecisionCache;
use crate::domain::registry::RelationRegistry;
use crate::domain::repo::{BridgeRepository, DirectoryRepository};

/// Computes the tri-state access decision for one `(caller, entity type)`
/// pair.
///
/// The resolver is tenant-coarse: it answers "which entity ids does the
/// caller's customer reach through the bridge table". Role nuance inside
/// the tenant (division-scoped versus tenant-wide) is layered on top by the
/// filter adapters, never here.
pub struct RelationResolver {
    registry: Arc<RelationRegistry>,
    directory: Arc<dyn DirectoryRepository>,
    bridges: Arc<dyn BridgeRepository>,
    decisions: Arc<DecisionCache>,
}

impl RelationResolver {
    #[must_use]
    pub fn new(
        registry: Arc<RelationRegistry>,
        directory: Arc<dyn DirectoryRepository>,
        bridges: Arc<dyn BridgeRepository>,
        decisions: Arc<DecisionCache>,
    ) -> Self {
        Self {
            registry,
            directory,
            bridges,
            decisions,
        }
    }

    /// Resolve the caller's decision for `entity_type`.
    ///
    /// Never fails: callers are mid-way through building a query and expect
    /// a decision value. Data-access errors come back as
    /// [`AccessDecision::Blocked`] (fail-closed) and are logged here.
    pub async fn resolve(&self, ctx: &UserContext, entity_type: &str) -> AccessDecision {
        // Platform administrators bypass every filter, for every entity
        // type, before any other check.
        if ctx.is_administrator() {
            return AccessDecision::Unrestricted;
        }

        // No config means no collaborator asked for this type to be
        // filtered: fail-open. `RelationRegistry::with_defaults` seeds the
        // platform's own types so this path is reserved for genuinely
        // foreign entity types.
        let Some(config) = self.registry.get(entity_type) else {
            tracing::debug!(entity_type, "no relation config registered, unrestricted");
            return AccessDecision::Unrestricted;
        };
        if !config.filter_enabled {
            return AccessDecision::Unrestricted;
        }

        // Only members of the hierarchy this resolver governs are
        // restricted; unrelated users are not its concern.
        let user_id = ctx.subject_id();
        let customer_id = match self.directory.customer_for_user(user_id).await {
            Ok(Some(customer_id)) => customer_id,
            Ok(None) => return AccessDecision::Unrestricted,
            Err(error) => {
                tracing::error!(
                    entity_type,
                    %user_id,
                    error = ?error,
                    "hierarchy probe failed, blocking access"
                );
                return AccessDecision::Blocked;
            }
        };

        if let Some(decision) = self.decisions.get(&config, user_id).await {
            return decision;
        }

        let decision = match self.bridges.distinct_entity_ids(&config, customer_id).await {
            // An empty id set normalizes to Blocked: "requested but empty"
            // is an explicit, cacheable no-access result.
            Ok(ids) => AccessDecision::restricted_to(ids),
            Err(error) => {
                tracing::error!(
                    entity_type,
                    %user_id,
                    %customer_id,
                    error = ?error,
                    "bridge query failed, blocking access"
                );
                // Not cached: a transient failure should heal on retry.
                return AccessDecision::Blocked;
            }
        };

        self.decisions.set(&config, user_id, &decision).await;
        decision
    }
}
