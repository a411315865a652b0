use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee row as seen by the access-control probes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub branch_id: Uuid,
    /// The platform user bridged 1:1 to this employee.
    pub user_id: Uuid,
}

/// Bridge values attached to one branch.
///
/// `agency_id` and `division_id` point into the external agency plugin and
/// are null when the branch is not bridged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchBridge {
    pub branch_id: Uuid,
    pub customer_id: Uuid,
    pub agency_id: Option<Uuid>,
    pub division_id: Option<Uuid>,
    pub inspector_user_id: Option<Uuid>,
}
