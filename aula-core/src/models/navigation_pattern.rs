use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An observed `from → to` route transition.
///
/// Unique per `(from, to)` pair. `avg_time_ms` is the running
/// `(old + new) / 2` average of time spent on `from` before leaving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPattern {
    pub from: String,
    pub to: String,
    pub frequency: u32,
    pub last_access: DateTime<Utc>,
    #[serde(rename = "avgTime")]
    pub avg_time_ms: u64,
}

impl NavigationPattern {
    pub fn new(from: &str, to: &str, time_spent_ms: u64, now: DateTime<Utc>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            frequency: 1,
            last_access: now,
            avg_time_ms: time_spent_ms,
        }
    }

    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    /// Fold in another observation of the same transition.
    pub fn observe(&mut self, time_spent_ms: u64, now: DateTime<Utc>) {
        self.frequency = self.frequency.saturating_add(1);
        self.avg_time_ms = ((u128::from(self.avg_time_ms) + u128::from(time_spent_ms)) / 2) as u64;
        self.last_access = now;
    }

    /// Fractional days elapsed since the last observation (never negative).
    pub fn days_since_access(&self, now: DateTime<Utc>) -> f64 {
        let millis = (now - self.last_access).num_milliseconds().max(0) as f64;
        millis / 86_400_000.0
    }
}
