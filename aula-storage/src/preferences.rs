//! Persisted UI layout preferences.

use serde::{Deserialize, Serialize};

use aula_core::constants::LAYOUT_PREFERENCES_KEY;
use aula_core::IDurableStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDensity {
    Compact,
    #[default]
    Comfortable,
}

/// Dashboard layout settings shared by every role's shell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutPreferences {
    pub sidebar_collapsed: bool,
    pub theme: Theme,
    pub density: LayoutDensity,
    pub pinned_routes: Vec<String>,
}

impl LayoutPreferences {
    /// Load from storage. Absent, unreadable, or corrupt data yields defaults.
    pub fn load(store: &dyn IDurableStore) -> Self {
        match store.read(LAYOUT_PREFERENCES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = LAYOUT_PREFERENCES_KEY, error = %e, "corrupt layout preferences, using defaults");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(key = LAYOUT_PREFERENCES_KEY, error = %e, "layout preferences unreadable");
                Self::default()
            }
        }
    }

    /// Persist. Returns false (and logs) if the write did not happen.
    pub fn save(&self, store: &dyn IDurableStore) -> bool {
        let raw = match serde_json::to_string(self) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "layout preferences not serializable");
                return false;
            }
        };
        match store.write(LAYOUT_PREFERENCES_KEY, &raw) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = LAYOUT_PREFERENCES_KEY, error = %e, "failed to save layout preferences");
                false
            }
        }
    }

    /// Pin a route to the sidebar; pinning twice is a no-op.
    pub fn pin(&mut self, route: &str) {
        if !self.pinned_routes.iter().any(|r| r == route) {
            self.pinned_routes.push(route.to_string());
        }
    }

    pub fn unpin(&mut self, route: &str) {
        self.pinned_routes.retain(|r| r != route);
    }
}
