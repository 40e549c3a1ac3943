//! Persisted table of observed route transitions.

use std::sync::Arc;
use std::time::Duration;

use aula_core::config::NavigationConfig;
use aula_core::models::NavigationPattern;
use aula_core::{IClock, IDurableStore};
use aula_observability::events;

/// Bounded `from → to` transition table, most recently accessed first.
///
/// Every mutation rewrites the whole table to durable storage. Storage
/// failures are logged and never reach the caller.
pub struct PatternStore {
    patterns: Vec<NavigationPattern>,
    max_patterns: usize,
    storage_key: String,
    store: Arc<dyn IDurableStore>,
    clock: Arc<dyn IClock>,
}

impl PatternStore {
    /// Create an empty store. Call [`load`](Self::load) to hydrate.
    pub fn new(
        config: &NavigationConfig,
        store: Arc<dyn IDurableStore>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        Self {
            patterns: Vec::new(),
            max_patterns: config.max_patterns,
            storage_key: config.storage_key.clone(),
            store,
            clock,
        }
    }

    /// Create and immediately hydrate from durable storage.
    pub fn open(
        config: &NavigationConfig,
        store: Arc<dyn IDurableStore>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        let mut patterns = Self::new(config, store, clock);
        patterns.load();
        patterns
    }

    /// Replace the in-memory table with the persisted one. Absent or
    /// corrupt state leaves the current table untouched.
    pub fn load(&mut self) {
        let raw = match self.store.read(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                events::storage_failure(&self.storage_key, "read", &e.to_string());
                return;
            }
        };
        match serde_json::from_str::<Vec<NavigationPattern>>(&raw) {
            Ok(patterns) => {
                self.patterns = patterns;
                self.sort_and_truncate();
                tracing::debug!(count = self.patterns.len(), "navigation patterns loaded");
            }
            Err(e) => {
                events::storage_failure(&self.storage_key, "parse", &e.to_string());
            }
        }
    }

    /// Record one navigation from `from` to `to` after `time_spent` on `from`.
    pub fn record(&mut self, from: &str, to: &str, time_spent: Duration) {
        let now = self.clock.now();
        let time_spent_ms = time_spent.as_millis().min(u64::MAX as u128) as u64;

        let frequency = match self.patterns.iter_mut().find(|p| p.matches(from, to)) {
            Some(existing) => {
                existing.observe(time_spent_ms, now);
                existing.frequency
            }
            None => {
                self.patterns
                    .push(NavigationPattern::new(from, to, time_spent_ms, now));
                1
            }
        };
        events::pattern_recorded(from, to, frequency);

        self.sort_and_truncate();
        self.persist();
    }

    /// Replace the table wholesale (e.g. from a server-side snapshot).
    pub fn seed(&mut self, patterns: Vec<NavigationPattern>) {
        self.patterns = patterns;
        self.sort_and_truncate();
        self.persist();
    }

    /// All patterns, most recently accessed first.
    pub fn patterns(&self) -> &[NavigationPattern] {
        &self.patterns
    }

    pub fn get(&self, from: &str, to: &str) -> Option<&NavigationPattern> {
        self.patterns.iter().find(|p| p.matches(from, to))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn sort_and_truncate(&mut self) {
        // Stable sort keeps insertion order among equal timestamps.
        self.patterns
            .sort_by(|a, b| b.last_access.cmp(&a.last_access));
        self.patterns.truncate(self.max_patterns);
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.patterns)
            .map_err(aula_core::AulaError::from)
            .and_then(|raw| self.store.write(&self.storage_key, &raw));
        if let Err(e) = result {
            events::storage_failure(&self.storage_key, "write", &e.to_string());
        }
    }
}
