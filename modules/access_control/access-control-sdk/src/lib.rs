//! Contracts for the StaffGrid access-control core.
//!
//! This crate carries everything a collaborator needs without depending on
//! the implementation:
//!
//! - [`RelationConfig`]: declarative description of how accessible ids for
//!   one entity type are computed from one bridge table; registered into the
//!   core's relation registry.
//! - [`CacheBackend`]: port over the external key/value cache service.
//! - [`AccessResolverApi`]: the resolution surface consumed by query
//!   filters.
//! - [`CacheInvalidationApi`]: the triggers CRUD services call after each
//!   hierarchy mutation.

mod api;
mod config;
mod error;

pub use api::{AccessResolverApi, CacheBackend, CacheInvalidationApi};
pub use config::{RelationConfig, entity_types};
pub use error::CacheError;
