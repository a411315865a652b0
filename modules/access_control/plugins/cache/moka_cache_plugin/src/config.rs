use serde::Deserialize;

/// Configuration for the in-memory cache backend.
#[derive(Clone, Debug, Deserialize)]
pub struct MokaCacheConfig {
    /// Maximum number of entries kept across all namespaces.
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> u64 {
    100_000
}
