//! In-memory [`CacheBackend`] implementation backed by moka.
//!
//! Intended for single-process deployments and tests. The backend honors the
//! per-entry TTL passed through [`CacheBackend::set`] via a custom moka
//! expiry policy, so entries written by different cache groups coexist with
//! different lifetimes inside one moka instance.
//!
//! [`CacheBackend`]: access_control_sdk::CacheBackend
//! [`CacheBackend::set`]: access_control_sdk::CacheBackend::set

mod config;
mod service;

pub use config::MokaCacheConfig;
pub use service::MokaCacheBackend;
