use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::INTELLIGENT_CACHE_KEY;

/// Generic LRU cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of live entries.
    pub max_size: usize,
    /// Entry lifetime in seconds, measured from insertion.
    pub max_age_secs: u64,
    /// Mirror the cache into durable storage on every mutation.
    pub persistent: bool,
    /// Base64-encode the persisted payload.
    pub compress: bool,
    /// Durable storage key for the persisted map.
    pub storage_key: String,
}

impl CacheConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: defaults::DEFAULT_CACHE_MAX_SIZE,
            max_age_secs: defaults::DEFAULT_CACHE_MAX_AGE_SECS,
            persistent: defaults::DEFAULT_CACHE_PERSISTENT,
            compress: defaults::DEFAULT_CACHE_COMPRESS,
            storage_key: INTELLIGENT_CACHE_KEY.to_string(),
        }
    }
}
