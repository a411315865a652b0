//! Client-side contract for the external agency directory.
//!
//! The agency plugin is an optional collaborator: branches may bridge to its
//! agencies and divisions, but nothing in the core requires it to be
//! installed. Consumers hold an `Arc<dyn AgencyDirectoryClient>` supplied at
//! composition time and check [`AgencyDirectoryClient::is_available`] before
//! contributing agency-scoped behavior; [`NullAgencyDirectory`] stands in
//! when the integration is absent.

mod api;
mod error;
mod models;

pub use api::{AgencyDirectoryClient, NullAgencyDirectory};
pub use error::AgencyError;
pub use models::AgencySummary;
