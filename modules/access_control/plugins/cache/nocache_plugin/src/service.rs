use std::time::Duration;

use access_control_sdk::{CacheBackend, CacheError};
use async_trait::async_trait;
use serde_json::Value;

/// Cache backend that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCacheBackend;

#[async_trait]
impl CacheBackend for NoCacheBackend {
    async fn get(&self, _namespace: &str, _key: &str) -> Result<Option<Value>, CacheError> {
        Ok(None)
    }

    async fn set(
        &self,
        _namespace: &str,
        _key: &str,
        _value: Value,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _namespace: &str, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }
}
