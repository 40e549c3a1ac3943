//! Bounded LRU map with age-based expiry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use aula_core::config::CacheConfig;
use aula_core::errors::AulaResult;
use aula_core::{IClock, IDurableStore};
use aula_observability::{cache_span, events};

use crate::entry::CacheEntry;
use crate::persistence;

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStats {
    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Single-owner LRU cache. All operations are synchronous against the
/// in-memory map; persistence is best-effort and never fails the caller.
pub struct IntelligentCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    config: CacheConfig,
    max_age: Duration,
    clock: Arc<dyn IClock>,
    store: Option<Arc<dyn IDurableStore>>,
    seq: u64,
    stats: CacheStats,
}

impl<T> IntelligentCache<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Create an in-memory cache. `config.persistent` is ignored without a store.
    pub fn new(config: CacheConfig, clock: Arc<dyn IClock>) -> Self {
        let max_age = to_chrono(&config);
        Self {
            entries: HashMap::new(),
            config,
            max_age,
            clock,
            store: None,
            seq: 0,
            stats: CacheStats::default(),
        }
    }

    /// Create a cache backed by durable storage. When `config.persistent`
    /// is set, previously stored entries younger than `max_age` are
    /// rehydrated; older or undecodable ones are dropped.
    pub fn with_store(
        config: CacheConfig,
        clock: Arc<dyn IClock>,
        store: Arc<dyn IDurableStore>,
    ) -> Self {
        let mut cache = Self::new(config, clock);
        if cache.config.persistent {
            cache.store = Some(store);
            cache.hydrate();
        }
        cache
    }

    fn hydrate(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let key = self.config.storage_key.clone();
        let _span = cache_span!(key).entered();
        let loaded =
            match persistence::load::<T>(store.as_ref(), &key, self.config.compress) {
                Ok(Some(entries)) => entries,
                Ok(None) => return,
                Err(e) => {
                    events::storage_failure(&key, "hydrate", &e.to_string());
                    return;
                }
            };

        let now = self.clock.now();
        let total = loaded.len();
        self.entries = loaded
            .into_iter()
            .filter(|(_, entry)| !entry.is_expired(now, self.max_age))
            .collect();
        self.seq = self
            .entries
            .values()
            .map(|e| e.access_seq)
            .max()
            .unwrap_or(0);
        tracing::debug!(
            storage_key = %key,
            restored = self.entries.len(),
            dropped = total - self.entries.len(),
            "cache rehydrated"
        );
        self.evict_overflow();
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Insert or overwrite `key`, then evict least-recently-accessed
    /// entries until the cache is back at capacity.
    pub fn set(&mut self, key: impl Into<String>, data: T) {
        let key = key.into();
        let now = self.clock.now();
        let seq = self.next_seq();
        self.entries.insert(key, CacheEntry::new(data, now, seq));
        self.evict_overflow();
        self.persist();
    }

    /// Fetch a live entry, refreshing its recency. Expired entries are
    /// purged and reported as misses.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            None => {
                self.stats.misses += 1;
                return None;
            }
            Some(entry) => entry.is_expired(now, self.max_age),
        };

        if expired {
            self.entries.remove(key);
            self.stats.misses += 1;
            self.stats.expirations += 1;
            events::cache_evicted(key, "expired");
            self.persist();
            return None;
        }

        let seq = self.next_seq();
        let data = self.entries.get_mut(key).map(|entry| {
            entry.touch(now, seq);
            entry.data.clone()
        });
        self.stats.hits += 1;
        self.persist();
        data
    }

    /// Return the cached value or compute, store, and return a fresh one.
    /// A failing `fetch` leaves the cache untouched.
    pub fn get_or_insert_with<F>(&mut self, key: &str, fetch: F) -> AulaResult<T>
    where
        F: FnOnce() -> AulaResult<T>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let value = fetch()?;
        self.set(key, value.clone());
        Ok(value)
    }

    /// Remove `key` unconditionally. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.persist();
        }
        removed
    }

    /// Drop every entry and erase the persisted copy.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(store) = &self.store {
            if let Err(e) = store.remove(&self.config.storage_key) {
                events::storage_failure(&self.config.storage_key, "clear", &e.to_string());
            }
        }
    }

    /// Purge all expired entries now. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let max_age = self.max_age;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, max_age));
        let purged = before - self.entries.len();
        if purged > 0 {
            self.stats.expirations += purged as u64;
            self.persist();
        }
        purged
    }

    /// Whether `key` holds a live entry. Does not touch recency.
    pub fn contains(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .get(key)
            .is_some_and(|e| !e.is_expired(now, self.max_age))
    }

    /// Inspect an entry's bookkeeping without touching it.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            ..self.stats
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.config.max_size {
            let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.recency())
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            self.entries.remove(&victim);
            self.stats.evictions += 1;
            events::cache_evicted(&victim, "lru");
        }
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let key = &self.config.storage_key;
        let result = persistence::encode(&self.entries, self.config.compress)
            .and_then(|raw| store.write(key, &raw));
        if let Err(e) = result {
            events::storage_failure(key, "persist", &e.to_string());
        }
    }
}

fn to_chrono(config: &CacheConfig) -> Duration {
    Duration::from_std(config.max_age()).unwrap_or(Duration::MAX)
}
