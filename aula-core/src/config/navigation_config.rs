use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::NAVIGATION_PATTERNS_KEY;

/// Navigation learning and route prefetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Most-recently-accessed patterns retained.
    pub max_patterns: usize,
    /// Minimum probability for a predicted route to be returned.
    pub prediction_threshold: f64,
    /// Probability above which a prefetch is issued with high priority.
    pub high_priority_threshold: f64,
    /// How long a route stays marked as preloaded (ms).
    pub preload_timeout_ms: u64,
    /// Hover debounce before a prefetch fires (ms).
    pub hover_delay_ms: u64,
    /// Upper bound on simultaneously marked routes.
    pub max_preloaded_routes: u64,
    /// Durable storage key for the pattern table.
    pub storage_key: String,
}

impl NavigationConfig {
    pub fn preload_timeout(&self) -> Duration {
        Duration::from_millis(self.preload_timeout_ms)
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_patterns: defaults::DEFAULT_MAX_PATTERNS,
            prediction_threshold: defaults::DEFAULT_PREDICTION_THRESHOLD,
            high_priority_threshold: defaults::DEFAULT_HIGH_PRIORITY_THRESHOLD,
            preload_timeout_ms: defaults::DEFAULT_PRELOAD_TIMEOUT_MS,
            hover_delay_ms: defaults::DEFAULT_HOVER_DELAY_MS,
            max_preloaded_routes: defaults::DEFAULT_MAX_PRELOADED_ROUTES,
            storage_key: NAVIGATION_PATTERNS_KEY.to_string(),
        }
    }
}
