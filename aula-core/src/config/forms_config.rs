use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::FORM_AUTOSAVE_KEY;

/// Multi-step form autosave configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Durable storage key for the autosave snapshot.
    pub autosave_key: String,
    /// Snapshots older than this are discarded on restore.
    pub autosave_max_age_hours: i64,
}

impl FormsConfig {
    pub fn autosave_max_age(&self) -> chrono::Duration {
        chrono::Duration::hours(self.autosave_max_age_hours)
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            autosave_key: FORM_AUTOSAVE_KEY.to_string(),
            autosave_max_age_hours: defaults::DEFAULT_AUTOSAVE_MAX_AGE_HOURS,
        }
    }
}
