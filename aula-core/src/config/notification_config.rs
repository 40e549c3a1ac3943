use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Realtime notification stream and REST client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Portal origin, e.g. `https://colegio.example.cl`.
    pub base_url: String,
    /// Server-sent events endpoint, relative to `base_url`.
    pub stream_path: String,
    /// REST collection endpoint, relative to `base_url`.
    pub notifications_path: String,
    /// Minimum gap between two desktop alerts (seconds).
    pub desktop_throttle_secs: u64,
    /// Reconnect attempts before the stream is declared unavailable.
    pub max_reconnect_attempts: u32,
    /// First reconnect delay (ms); doubles per attempt.
    pub reconnect_base_ms: u64,
    /// Reconnect delay cap (ms).
    pub reconnect_max_ms: u64,
    /// Page size for list requests.
    pub list_limit: usize,
    /// REST request timeout (seconds).
    pub request_timeout_secs: u64,
    /// REST retry attempts on 5xx / network errors.
    pub max_retries: u32,
    /// First REST retry delay (ms).
    pub retry_initial_backoff_ms: u64,
    /// REST retry delay cap (ms).
    pub retry_max_backoff_ms: u64,
}

impl NotificationConfig {
    pub fn desktop_throttle(&self) -> Duration {
        Duration::from_secs(self.desktop_throttle_secs)
    }

    pub fn stream_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.stream_path)
    }

    pub fn notifications_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.notifications_path
        )
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_API_BASE_URL.to_string(),
            stream_path: defaults::DEFAULT_STREAM_PATH.to_string(),
            notifications_path: defaults::DEFAULT_NOTIFICATIONS_PATH.to_string(),
            desktop_throttle_secs: defaults::DEFAULT_DESKTOP_THROTTLE_SECS,
            max_reconnect_attempts: defaults::DEFAULT_MAX_RECONNECT_ATTEMPTS,
            reconnect_base_ms: defaults::DEFAULT_RECONNECT_BASE_MS,
            reconnect_max_ms: defaults::DEFAULT_RECONNECT_MAX_MS,
            list_limit: defaults::DEFAULT_NOTIFICATION_LIMIT,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            retry_initial_backoff_ms: defaults::DEFAULT_RETRY_INITIAL_BACKOFF_MS,
            retry_max_backoff_ms: defaults::DEFAULT_RETRY_MAX_BACKOFF_MS,
        }
    }
}
