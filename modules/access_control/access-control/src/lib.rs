//! Access-control core for the StaffGrid platform.
//!
//! Given a caller and an entity type, this crate computes which rows the
//! caller may see across the customer → branch → employee hierarchy, and
//! keeps the per-entity caches coherent while CRUD services mutate that
//! hierarchy.
//!
//! The moving parts, in dependency order:
//!
//! - [`domain::registry::RelationRegistry`]: declarative map from entity
//!   type to the bridge table that resolves it.
//! - [`cache`]: entity cache managers with tracked-key group invalidation
//!   over a wildcard-less backend, plus the invalidation triggers.
//! - [`domain::resolver::RelationResolver`]: the tri-state decision
//!   computation.
//! - [`adapters`]: one pure `Condition` filter per consuming list surface.
//!
//! Everything is wired once at startup through [`AccessControlBuilder`]:
//!
//! ```ignore
//! let access = AccessControl::builder()
//!     .db(conn)
//!     .cache_backend(Arc::new(MokaCacheBackend::default()))
//!     .agency_directory(agency_client)
//!     .build()?;
//!
//! let decision = access.resolver().resolve(&ctx, entity_types::AGENCY).await;
//! let cond = access.branches().apply(Condition::all(), &ctx, "b").await;
//! ```

pub mod adapters;
mod builder;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;

pub use builder::{AccessControl, AccessControlBuilder, BuildError};
