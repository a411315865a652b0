//! Shared filter for surfaces owned by the agency plugin.

use std::sync::Arc;

use agency_sdk::AgencyDirectoryClient;
use sea_orm::Condition;
use staffgrid_security::UserContext;
use uuid::Uuid;

use crate::adapters::predicate::{decision_condition, deny_all, single_id};
use crate::domain::model::BranchBridge;
use crate::domain::repo::DirectoryRepository;
use crate::domain::resolver::RelationResolver;

/// Filter over an agency-plugin surface whose rows are reached through the
/// branch bridge columns (agencies, divisions).
///
/// Division-scoped callers are restricted to the single bridge value of
/// their own branch; tenant-wide callers get the resolver's coarse
/// decision. When the agency integration is absent the filter contributes
/// nothing; the query must keep working without the plugin.
pub(crate) struct BridgedListFilter {
    entity_type: &'static str,
    id_column: &'static str,
    bridge_value: fn(&BranchBridge) -> Option<Uuid>,
    resolver: Arc<RelationResolver>,
    directory: Arc<dyn DirectoryRepository>,
    agency: Arc<dyn AgencyDirectoryClient>,
}

impl BridgedListFilter {
    pub(crate) fn new(
        entity_type: &'static str,
        id_column: &'static str,
        bridge_value: fn(&BranchBridge) -> Option<Uuid>,
        resolver: Arc<RelationResolver>,
        directory: Arc<dyn DirectoryRepository>,
        agency: Arc<dyn AgencyDirectoryClient>,
    ) -> Self {
        Self {
            entity_type,
            id_column,
            bridge_value,
            resolver,
            directory,
            agency,
        }
    }

    pub(crate) async fn apply(
        &self,
        cond: Condition,
        ctx: &UserContext,
        alias: &str,
    ) -> Condition {
        if ctx.is_administrator() {
            return cond;
        }
        if !self.agency.is_available() {
            tracing::debug!(
                entity_type = self.entity_type,
                "agency integration unavailable, contributing no predicate"
            );
            return cond;
        }

        // Ownership makes the caller tenant-wide; the coarse decision comes
        // from the resolver.
        let owner = match self.directory.customer_owned_by(ctx.subject_id()).await {
            Ok(owner) => owner,
            Err(error) => {
                tracing::error!(
                    entity_type = self.entity_type,
                    user_id = %ctx.subject_id(),
                    error = ?error,
                    "ownership probe failed, hiding all rows"
                );
                return cond.add(deny_all());
            }
        };
        if owner.is_some() {
            let decision = self.resolver.resolve(ctx, self.entity_type).await;
            return match decision_condition(&decision, alias, self.id_column) {
                Some(predicate) => cond.add(predicate),
                None => cond,
            };
        }

        // An employee row makes the caller division-scoped: only the bridge
        // value of their own branch, strictly narrower than the tenant-wide
        // set.
        let employee = match self.directory.employee_for_user(ctx.subject_id()).await {
            Ok(Some(employee)) => employee,
            Ok(None) => return cond, // not a hierarchy member
            Err(error) => {
                tracing::error!(
                    entity_type = self.entity_type,
                    user_id = %ctx.subject_id(),
                    error = ?error,
                    "employee probe failed, hiding all rows"
                );
                return cond.add(deny_all());
            }
        };

        let bridge = match self.directory.branch_bridge(employee.branch_id).await {
            Ok(bridge) => bridge,
            Err(error) => {
                tracing::error!(
                    entity_type = self.entity_type,
                    branch_id = %employee.branch_id,
                    error = ?error,
                    "branch probe failed, hiding all rows"
                );
                return cond.add(deny_all());
            }
        };

        match bridge.and_then(|bridge| (self.bridge_value)(&bridge)) {
            Some(id) => cond.add(single_id(alias, self.id_column, id)),
            // The caller's branch carries no bridge value: nothing to see.
            None => cond.add(deny_all()),
        }
    }
}
