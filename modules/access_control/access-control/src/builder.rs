//! Startup-time composition of the access-control core.
//!
//! Every dependency (connection, cache backend, agency capability,
//! registry) is injected here, once, at the composition root. Nothing in
//! the core reaches for ambient globals or probes for collaborators at
//! call sites.

use std::sync::Arc;

use access_control_sdk::{AccessResolverApi, CacheBackend, CacheInvalidationApi};
use agency_sdk::{AgencyDirectoryClient, NullAgencyDirectory};
use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::adapters::{
    AgencyListFilter, BranchListFilter, CustomerListFilter, DivisionListFilter,
    EmployeeListFilter,
};
use crate::cache::{DecisionCache, EntityCache, InvalidationService, branch_cache, employee_cache};
use crate::config::AccessControlConfig;
use crate::domain::local_client::AccessResolverLocalClient;
use crate::domain::registry::RelationRegistry;
use crate::domain::repo::DirectoryRepository;
use crate::domain::resolver::RelationResolver;
use crate::infra::storage::{SeaOrmBridgeRepository, SeaOrmDirectoryRepository};

/// Composition errors. Optional collaborators have null-object defaults;
/// the database and the cache backend do not.
#[derive(Error, Debug)]
pub enum BuildError {
    /// No database connection supplied.
    #[error("database connection is required")]
    MissingDatabase,

    /// No cache backend supplied.
    #[error("cache backend is required")]
    MissingCacheBackend,
}

/// The wired access-control core.
pub struct AccessControl {
    registry: Arc<RelationRegistry>,
    resolver: Arc<RelationResolver>,
    branch_cache: Arc<EntityCache>,
    employee_cache: Arc<EntityCache>,
    invalidations: Arc<InvalidationService>,
    customers: CustomerListFilter,
    branches: BranchListFilter,
    employees: EmployeeListFilter,
    agencies: AgencyListFilter,
    divisions: DivisionListFilter,
}

impl AccessControl {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> AccessControlBuilder {
        AccessControlBuilder::default()
    }

    /// Registry handle for collaborators that register configs later.
    #[must_use]
    pub fn registry(&self) -> Arc<RelationRegistry> {
        self.registry.clone()
    }

    #[must_use]
    pub fn resolver(&self) -> Arc<RelationResolver> {
        self.resolver.clone()
    }

    /// SDK-facing resolver client.
    #[must_use]
    pub fn resolver_client(&self) -> Arc<dyn AccessResolverApi> {
        Arc::new(AccessResolverLocalClient::new(self.resolver.clone()))
    }

    /// Invalidation triggers for the CRUD services.
    #[must_use]
    pub fn invalidations(&self) -> Arc<dyn CacheInvalidationApi> {
        self.invalidations.clone()
    }

    /// Branch cache group, for list surfaces that store their results.
    #[must_use]
    pub fn branch_cache(&self) -> Arc<EntityCache> {
        self.branch_cache.clone()
    }

    /// Employee cache group, for list surfaces that store their results.
    #[must_use]
    pub fn employee_cache(&self) -> Arc<EntityCache> {
        self.employee_cache.clone()
    }

    #[must_use]
    pub fn customers(&self) -> &CustomerListFilter {
        &self.customers
    }

    #[must_use]
    pub fn branches(&self) -> &BranchListFilter {
        &self.branches
    }

    #[must_use]
    pub fn employees(&self) -> &EmployeeListFilter {
        &self.employees
    }

    #[must_use]
    pub fn agencies(&self) -> &AgencyListFilter {
        &self.agencies
    }

    #[must_use]
    pub fn divisions(&self) -> &DivisionListFilter {
        &self.divisions
    }
}

/// Builder for [`AccessControl`].
#[derive(Default)]
pub struct AccessControlBuilder {
    db: Option<DatabaseConnection>,
    cache: Option<Arc<dyn CacheBackend>>,
    agency: Option<Arc<dyn AgencyDirectoryClient>>,
    registry: Option<Arc<RelationRegistry>>,
    config: AccessControlConfig,
}

impl AccessControlBuilder {
    #[must_use]
    pub fn db(mut self, conn: DatabaseConnection) -> Self {
        self.db = Some(conn);
        self
    }

    #[must_use]
    pub fn cache_backend(mut self, backend: Arc<dyn CacheBackend>) -> Self {
        self.cache = Some(backend);
        self
    }

    /// Supply the agency integration. Defaults to
    /// [`NullAgencyDirectory`] when the plugin is not installed.
    #[must_use]
    pub fn agency_directory(mut self, client: Arc<dyn AgencyDirectoryClient>) -> Self {
        self.agency = Some(client);
        self
    }

    /// Supply a registry. Defaults to
    /// [`RelationRegistry::with_defaults`].
    #[must_use]
    pub fn registry(mut self, registry: Arc<RelationRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn config(mut self, config: AccessControlConfig) -> Self {
        self.config = config;
        self
    }

    /// Wire the core.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the database connection or the cache
    /// backend is missing.
    pub fn build(self) -> Result<AccessControl, BuildError> {
        let conn = self.db.ok_or(BuildError::MissingDatabase)?;
        let backend = self.cache.ok_or(BuildError::MissingCacheBackend)?;
        let agency = self
            .agency
            .unwrap_or_else(|| Arc::new(NullAgencyDirectory));
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(RelationRegistry::with_defaults()));

        let directory: Arc<dyn DirectoryRepository> =
            Arc::new(SeaOrmDirectoryRepository::new(conn.clone()));
        let bridges = Arc::new(SeaOrmBridgeRepository::new(conn));
        let decisions = Arc::new(DecisionCache::new(backend.clone()));
        let branch_group = Arc::new(branch_cache(backend.clone(), self.config.branch_cache_ttl()));
        let employee_group = Arc::new(employee_cache(backend, self.config.employee_cache_ttl()));
        let invalidations = Arc::new(InvalidationService::new(
            branch_group.clone(),
            employee_group.clone(),
            decisions.clone(),
        ));
        let resolver = Arc::new(RelationResolver::new(
            registry.clone(),
            directory.clone(),
            bridges,
            decisions,
        ));

        Ok(AccessControl {
            registry,
            resolver: resolver.clone(),
            branch_cache: branch_group,
            employee_cache: employee_group,
            invalidations,
            customers: CustomerListFilter::new(directory.clone()),
            branches: BranchListFilter::new(directory.clone(), agency.clone()),
            employees: EmployeeListFilter::new(directory.clone()),
            agencies: AgencyListFilter::new(resolver.clone(), directory.clone(), agency.clone()),
            divisions: DivisionListFilter::new(resolver, directory, agency),
        })
    }
}
