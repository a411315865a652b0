use std::collections::HashMap;
use std::sync::Arc;

use access_control_sdk::RelationConfig;
use agency_sdk::{AgencyDirectoryClient, AgencyError, AgencySummary};
use async_trait::async_trait;
use nocache_plugin::NoCacheBackend;
use sea_orm::Condition;
use sea_orm::sea_query::{Alias, Query, SqliteQueryBuilder};
use staffgrid_security::{Role, UserContext};
use uuid::Uuid;

use crate::adapters::{
    AgencyListFilter, BranchListFilter, CustomerListFilter, DivisionListFilter,
    EmployeeListFilter, ListFilter,
};
use crate::cache::DecisionCache;
use crate::domain::model::{BranchBridge, EmployeeRecord};
use crate::domain::registry::RelationRegistry;
use crate::domain::repo::{BridgeRepository, DirectoryRepository};
use crate::domain::resolver::RelationResolver;

// The scenario from the platform's reference data set: customer 5 with two
// bridged branches, customer 6 with an unbridged one.
const CUSTOMER_5: Uuid = Uuid::from_u128(5);
const CUSTOMER_6: Uuid = Uuid::from_u128(6);
const OWNER_5: Uuid = Uuid::from_u128(100);
const BRANCH_1: Uuid = Uuid::from_u128(1);
const BRANCH_2: Uuid = Uuid::from_u128(2);
const BRANCH_3: Uuid = Uuid::from_u128(3);
const AGENCY_10: Uuid = Uuid::from_u128(10);
const AGENCY_20: Uuid = Uuid::from_u128(20);
const DIVISION_100: Uuid = Uuid::from_u128(200_100);
const USER_42: Uuid = Uuid::from_u128(42);
const USER_43: Uuid = Uuid::from_u128(43);
const EMPLOYEE_1: Uuid = Uuid::from_u128(901);
const EMPLOYEE_2: Uuid = Uuid::from_u128(902);

#[derive(Default)]
struct FakeDirectory {
    employees_by_user: HashMap<Uuid, EmployeeRecord>,
    owners_by_user: HashMap<Uuid, Uuid>,
    bridges_by_branch: HashMap<Uuid, BranchBridge>,
    fail: bool,
}

impl FakeDirectory {
    fn scenario() -> Self {
        let mut directory = Self::default();
        directory.owners_by_user.insert(OWNER_5, CUSTOMER_5);
        directory.employees_by_user.insert(
            USER_42,
            EmployeeRecord {
                id: EMPLOYEE_1,
                customer_id: CUSTOMER_5,
                branch_id: BRANCH_1,
                user_id: USER_42,
            },
        );
        directory.employees_by_user.insert(
            USER_43,
            EmployeeRecord {
                id: EMPLOYEE_2,
                customer_id: CUSTOMER_6,
                branch_id: BRANCH_3,
                user_id: USER_43,
            },
        );
        directory.bridges_by_branch.insert(
            BRANCH_1,
            BranchBridge {
                branch_id: BRANCH_1,
                customer_id: CUSTOMER_5,
                agency_id: Some(AGENCY_10),
                division_id: Some(DIVISION_100),
                inspector_user_id: None,
            },
        );
        directory.bridges_by_branch.insert(
            BRANCH_2,
            BranchBridge {
                branch_id: BRANCH_2,
                customer_id: CUSTOMER_5,
                agency_id: Some(AGENCY_20),
                division_id: None,
                inspector_user_id: None,
            },
        );
        directory.bridges_by_branch.insert(
            BRANCH_3,
            BranchBridge {
                branch_id: BRANCH_3,
                customer_id: CUSTOMER_6,
                agency_id: None,
                division_id: None,
                inspector_user_id: None,
            },
        );
        directory
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl DirectoryRepository for FakeDirectory {
    async fn employee_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<EmployeeRecord>> {
        if self.fail {
            anyhow::bail!("directory unreachable");
        }
        Ok(self.employees_by_user.get(&user_id).cloned())
    }

    async fn customer_owned_by(&self, user_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        if self.fail {
            anyhow::bail!("directory unreachable");
        }
        Ok(self.owners_by_user.get(&user_id).copied())
    }

    async fn customer_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        if let Some(employee) = self.employee_for_user(user_id).await? {
            return Ok(Some(employee.customer_id));
        }
        self.customer_owned_by(user_id).await
    }

    async fn branch_bridge(&self, branch_id: Uuid) -> anyhow::Result<Option<BranchBridge>> {
        if self.fail {
            anyhow::bail!("directory unreachable");
        }
        Ok(self.bridges_by_branch.get(&branch_id).cloned())
    }
}

/// Bridge repo computing distinct ids from the same fixture the directory
/// uses.
struct FakeBridges {
    bridges: Vec<BranchBridge>,
}

impl FakeBridges {
    fn scenario() -> Self {
        Self {
            bridges: FakeDirectory::scenario()
                .bridges_by_branch
                .into_values()
                .collect(),
        }
    }
}

#[async_trait]
impl BridgeRepository for FakeBridges {
    async fn distinct_entity_ids(
        &self,
        config: &RelationConfig,
        customer_id: Uuid,
    ) -> anyhow::Result<Vec<Uuid>> {
        let ids = self
            .bridges
            .iter()
            .filter(|bridge| bridge.customer_id == customer_id)
            .filter_map(|bridge| match config.entity_column.as_str() {
                "agency_id" => bridge.agency_id,
                "division_id" => bridge.division_id,
                _ => None,
            });
        Ok(ids.collect())
    }
}

struct FakeAgencyDirectory {
    available: bool,
    by_user: HashMap<Uuid, AgencySummary>,
    fail: bool,
}

impl FakeAgencyDirectory {
    fn installed() -> Self {
        Self {
            available: true,
            by_user: HashMap::new(),
            fail: false,
        }
    }

    fn with_staff(mut self, user_id: Uuid, agency_id: Uuid) -> Self {
        self.by_user.insert(
            user_id,
            AgencySummary {
                id: agency_id,
                name: "North Agency".to_owned(),
            },
        );
        self
    }
}

#[async_trait]
impl AgencyDirectoryClient for FakeAgencyDirectory {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn agency_of_user(
        &self,
        _ctx: &UserContext,
        user_id: Uuid,
    ) -> Result<Option<AgencySummary>, AgencyError> {
        if self.fail {
            return Err(AgencyError::Unavailable);
        }
        Ok(self.by_user.get(&user_id).cloned())
    }
}

fn resolver(directory: Arc<FakeDirectory>) -> Arc<RelationResolver> {
    Arc::new(RelationResolver::new(
        Arc::new(RelationRegistry::with_defaults()),
        directory,
        Arc::new(FakeBridges::scenario()),
        Arc::new(DecisionCache::new(Arc::new(NoCacheBackend))),
    ))
}

fn render(table: &str, alias: &str, cond: Condition) -> String {
    Query::select()
        .column((Alias::new(alias), Alias::new("id")))
        .from_as(Alias::new(table), Alias::new(alias))
        .cond_where(cond)
        .to_string(SqliteQueryBuilder)
}

fn ctx(user_id: Uuid, role: Role) -> UserContext {
    UserContext::builder().subject_id(user_id).role(role).build()
}

fn agency_filter(agency: Arc<dyn AgencyDirectoryClient>) -> AgencyListFilter {
    let directory = Arc::new(FakeDirectory::scenario());
    AgencyListFilter::new(resolver(directory.clone()), directory, agency)
}

#[tokio::test]
async fn administrator_passes_every_surface_untouched() {
    let directory = Arc::new(FakeDirectory::scenario());
    let agency: Arc<dyn AgencyDirectoryClient> = Arc::new(FakeAgencyDirectory::installed());
    let admin = ctx(Uuid::new_v4(), Role::Administrator);

    let filters: Vec<Box<dyn ListFilter>> = vec![
        Box::new(CustomerListFilter::new(directory.clone())),
        Box::new(BranchListFilter::new(directory.clone(), agency.clone())),
        Box::new(EmployeeListFilter::new(directory.clone())),
        Box::new(AgencyListFilter::new(
            resolver(directory.clone()),
            directory.clone(),
            agency.clone(),
        )),
        Box::new(DivisionListFilter::new(
            resolver(directory.clone()),
            directory,
            agency,
        )),
    ];

    let unfiltered = render("t", "t", Condition::all());
    for filter in filters {
        let cond = filter.apply(Condition::all(), &admin, "t").await;
        assert_eq!(render("t", "t", cond), unfiltered);
    }
}

#[tokio::test]
async fn division_scoped_employee_sees_only_the_own_branch_agency() {
    let filter = agency_filter(Arc::new(FakeAgencyDirectory::installed()));

    let cond = filter
        .apply(Condition::all(), &ctx(USER_42, Role::Staff), "ag")
        .await;
    let sql = render("agencies", "ag", cond);

    assert!(sql.contains(&format!(r#""ag"."id" = '{AGENCY_10}'"#)), "got: {sql}");
    assert!(!sql.contains(&AGENCY_20.to_string()), "branch 2's agency must be excluded");
}

#[tokio::test]
async fn tenant_wide_owner_sees_every_bridged_agency() {
    let filter = agency_filter(Arc::new(FakeAgencyDirectory::installed()));

    let cond = filter
        .apply(Condition::all(), &ctx(OWNER_5, Role::CustomerAdmin), "ag")
        .await;
    let sql = render("agencies", "ag", cond);

    assert!(sql.contains(r#""ag"."id" IN"#), "got: {sql}");
    assert!(sql.contains(&AGENCY_10.to_string()));
    assert!(sql.contains(&AGENCY_20.to_string()));
}

#[tokio::test]
async fn employee_without_a_bridged_branch_sees_nothing() {
    let filter = agency_filter(Arc::new(FakeAgencyDirectory::installed()));

    let cond = filter
        .apply(Condition::all(), &ctx(USER_43, Role::Staff), "ag")
        .await;
    let sql = render("agencies", "ag", cond);

    assert!(sql.contains("FALSE"), "got: {sql}");
}

#[tokio::test]
async fn missing_agency_integration_contributes_no_predicate() {
    let absent: Arc<dyn AgencyDirectoryClient> = Arc::new(agency_sdk::NullAgencyDirectory);
    let filter = agency_filter(absent);

    let cond = filter
        .apply(Condition::all(), &ctx(USER_42, Role::Staff), "ag")
        .await;

    assert_eq!(
        render("agencies", "ag", cond),
        render("agencies", "ag", Condition::all())
    );
}

#[tokio::test]
async fn division_surface_uses_the_division_bridge_value() {
    let directory = Arc::new(FakeDirectory::scenario());
    let agency: Arc<dyn AgencyDirectoryClient> = Arc::new(FakeAgencyDirectory::installed());
    let filter = DivisionListFilter::new(resolver(directory.clone()), directory, agency);

    let cond = filter
        .apply(Condition::all(), &ctx(USER_42, Role::Staff), "d")
        .await;
    let sql = render("divisions", "d", cond);

    assert!(sql.contains(&format!(r#""d"."id" = '{DIVISION_100}'"#)), "got: {sql}");
}

#[tokio::test]
async fn customers_surface_restricts_members_to_their_own_row() {
    let directory = Arc::new(FakeDirectory::scenario());
    let filter = CustomerListFilter::new(directory);

    let cond = filter
        .apply(Condition::all(), &ctx(USER_42, Role::Staff), "c")
        .await;
    let sql = render("customers", "c", cond);

    assert!(sql.contains(&format!(r#""c"."id" = '{CUSTOMER_5}'"#)), "got: {sql}");
}

#[tokio::test]
async fn customers_surface_fails_closed_on_probe_errors() {
    let filter = CustomerListFilter::new(Arc::new(FakeDirectory::failing()));

    let cond = filter
        .apply(Condition::all(), &ctx(USER_42, Role::Staff), "c")
        .await;

    assert!(render("customers", "c", cond).contains("FALSE"));
}

#[tokio::test]
async fn branches_surface_scopes_owner_and_employee_differently() {
    let directory = Arc::new(FakeDirectory::scenario());
    let agency: Arc<dyn AgencyDirectoryClient> = Arc::new(FakeAgencyDirectory::installed());
    let filter = BranchListFilter::new(directory, agency);

    let owner_sql = render(
        "branches",
        "b",
        filter
            .apply(Condition::all(), &ctx(OWNER_5, Role::CustomerAdmin), "b")
            .await,
    );
    assert!(
        owner_sql.contains(&format!(r#""b"."customer_id" = '{CUSTOMER_5}'"#)),
        "got: {owner_sql}"
    );

    let staff_sql = render(
        "branches",
        "b",
        filter
            .apply(Condition::all(), &ctx(USER_42, Role::Staff), "b")
            .await,
    );
    assert!(
        staff_sql.contains(&format!(r#""b"."id" = '{BRANCH_1}'"#)),
        "got: {staff_sql}"
    );
}

#[tokio::test]
async fn agency_staff_see_branches_bridged_to_their_agency() {
    let directory = Arc::new(FakeDirectory::scenario());
    let inspector = Uuid::from_u128(77);
    let agency: Arc<dyn AgencyDirectoryClient> =
        Arc::new(FakeAgencyDirectory::installed().with_staff(inspector, AGENCY_10));
    let filter = BranchListFilter::new(directory, agency);

    let cond = filter
        .apply(Condition::all(), &ctx(inspector, Role::AgencyStaff), "b")
        .await;
    let sql = render("branches", "b", cond);

    assert!(
        sql.contains(&format!(r#""b"."agency_id" = '{AGENCY_10}'"#)),
        "got: {sql}"
    );
}

#[tokio::test]
async fn failing_agency_probe_degrades_to_no_predicate() {
    let directory = Arc::new(FakeDirectory::scenario());
    let agency: Arc<dyn AgencyDirectoryClient> = Arc::new(FakeAgencyDirectory {
        available: true,
        by_user: HashMap::new(),
        fail: true,
    });
    let filter = BranchListFilter::new(directory, agency);
    let inspector = ctx(Uuid::from_u128(77), Role::AgencyStaff);

    let cond = filter.apply(Condition::all(), &inspector, "b").await;

    assert_eq!(
        render("branches", "b", cond),
        render("branches", "b", Condition::all())
    );
}

#[tokio::test]
async fn employees_surface_distinguishes_owner_branch_admin_and_staff() {
    let directory = Arc::new(FakeDirectory::scenario());
    let filter = EmployeeListFilter::new(directory);

    let owner_sql = render(
        "employees",
        "e",
        filter
            .apply(Condition::all(), &ctx(OWNER_5, Role::CustomerAdmin), "e")
            .await,
    );
    assert!(
        owner_sql.contains(&format!(r#""e"."customer_id" = '{CUSTOMER_5}'"#)),
        "got: {owner_sql}"
    );

    let admin_sql = render(
        "employees",
        "e",
        filter
            .apply(Condition::all(), &ctx(USER_42, Role::BranchAdmin), "e")
            .await,
    );
    assert!(
        admin_sql.contains(&format!(r#""e"."branch_id" = '{BRANCH_1}'"#)),
        "got: {admin_sql}"
    );

    let staff_sql = render(
        "employees",
        "e",
        filter
            .apply(Condition::all(), &ctx(USER_42, Role::Staff), "e")
            .await,
    );
    assert!(
        staff_sql.contains(&format!(r#""e"."id" = '{EMPLOYEE_1}'"#)),
        "got: {staff_sql}"
    );
}

#[tokio::test]
async fn the_alias_is_never_hardcoded() {
    let directory = Arc::new(FakeDirectory::scenario());
    let filter = CustomerListFilter::new(directory);

    for alias in ["c", "customers_outer", "x1"] {
        let cond = filter
            .apply(Condition::all(), &ctx(USER_42, Role::Staff), alias)
            .await;
        let sql = render("customers", alias, cond);
        assert!(
            sql.contains(&format!(r#""{alias}"."id" ="#)),
            "alias {alias} missing in: {sql}"
        );
    }
}
