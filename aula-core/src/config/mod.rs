//! Workspace configuration, loadable from TOML with per-section defaults.

mod cache_config;
pub mod defaults;
mod forms_config;
mod navigation_config;
mod notification_config;
mod observability_config;

pub use cache_config::CacheConfig;
pub use forms_config::FormsConfig;
pub use navigation_config::NavigationConfig;
pub use notification_config::NotificationConfig;
pub use observability_config::ObservabilityConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{AulaError, AulaResult};

/// Top-level configuration. Missing sections and fields fall back to
/// the values in [`defaults`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AulaConfig {
    pub cache: CacheConfig,
    pub navigation: NavigationConfig,
    pub notifications: NotificationConfig,
    pub forms: FormsConfig,
    pub observability: ObservabilityConfig,
}

impl AulaConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> AulaResult<Self> {
        toml::from_str(source).map_err(|e| AulaError::Config {
            reason: e.to_string(),
        })
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> AulaResult<String> {
        toml::to_string(self).map_err(|e| AulaError::Config {
            reason: e.to_string(),
        })
    }
}
