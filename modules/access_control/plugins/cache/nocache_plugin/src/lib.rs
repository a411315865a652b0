//! No-op [`CacheBackend`]: every read misses, every write is dropped.
//!
//! Used when caching is disabled for a deployment and as the baseline in
//! tests, where resolution must stay correct with no cache at all.
//!
//! [`CacheBackend`]: access_control_sdk::CacheBackend

mod service;

pub use service::NoCacheBackend;
