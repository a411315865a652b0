use serde::{Deserialize, Serialize};

/// Platform roles relevant to access resolution.
///
/// Roles are assigned by the platform's auth layer and delivered inside
/// [`crate::UserContext`]. Hierarchy facts (which customer, which branch)
/// are never derived from roles; they come from the persisted rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator. Bypasses all row filtering, unconditionally.
    Administrator,
    /// Tenant-wide admin of one customer (the owner).
    CustomerAdmin,
    /// Admin of a single branch within a customer.
    BranchAdmin,
    /// Regular employee of a branch.
    Staff,
    /// Role granted by the external agency plugin to its own staff.
    AgencyStaff,
}
