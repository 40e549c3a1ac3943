use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A cached value with its bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    pub data: T,
    /// Creation time; expiry is measured from here.
    pub timestamp: DateTime<Utc>,
    pub access_count: u64,
    pub last_access: DateTime<Utc>,
    /// Monotonic access order, breaks `last_access` ties.
    #[serde(default)]
    pub(crate) access_seq: u64,
}

impl<T> CacheEntry<T> {
    pub(crate) fn new(data: T, now: DateTime<Utc>, seq: u64) -> Self {
        Self {
            data,
            timestamp: now,
            access_count: 1,
            last_access: now,
            access_seq: seq,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.timestamp >= max_age
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>, seq: u64) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_access = now;
        self.access_seq = seq;
    }

    /// Eviction order: oldest access first.
    pub(crate) fn recency(&self) -> (DateTime<Utc>, u64) {
        (self.last_access, self.access_seq)
    }
}
