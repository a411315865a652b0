use async_trait::async_trait;
use staffgrid_security::UserContext;
use uuid::Uuid;

use crate::error::AgencyError;
use crate::models::AgencySummary;

/// Typed capability over the external agency directory.
///
/// One implementation is registered per deployment at composition time:
/// the real integration when the agency plugin is installed,
/// [`NullAgencyDirectory`] otherwise. Every call site checks
/// [`is_available`](Self::is_available) first instead of probing for the
/// plugin's presence at runtime.
#[async_trait]
pub trait AgencyDirectoryClient: Send + Sync {
    /// Whether the integration is installed and active.
    fn is_available(&self) -> bool;

    /// Agency the given user belongs to, if the user is agency staff.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be reached; callers on
    /// query paths degrade to "no contribution".
    async fn agency_of_user(
        &self,
        ctx: &UserContext,
        user_id: Uuid,
    ) -> Result<Option<AgencySummary>, AgencyError>;
}

/// Null object used when the agency plugin is absent: never available,
/// never returns data, never pushes the caller onto a failure path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAgencyDirectory;

#[async_trait]
impl AgencyDirectoryClient for NullAgencyDirectory {
    fn is_available(&self) -> bool {
        false
    }

    async fn agency_of_user(
        &self,
        _ctx: &UserContext,
        _user_id: Uuid,
    ) -> Result<Option<AgencySummary>, AgencyError> {
        Ok(None)
    }
}
