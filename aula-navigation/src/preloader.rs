//! Deduplicated route prefetch hints.
//!
//! Uses `moka::sync::Cache` as the "already preloaded" set, with a TTL
//! equal to the preload timeout so marks expire on their own.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use moka::sync::Cache;

use aula_core::config::NavigationConfig;
use aula_core::models::NavigationPattern;
use aula_core::{IPrefetcher, PreloadPriority};
use aula_observability::events;

use crate::predictor::{RoutePrediction, RoutePredictor};

/// Issues prefetch hints through an [`IPrefetcher`], at most once per
/// route per preload timeout.
pub struct Preloader {
    prefetcher: Arc<dyn IPrefetcher>,
    marks: Cache<String, PreloadPriority>,
    high_priority_threshold: f64,
    issued: AtomicU64,
    failed: AtomicU64,
}

impl Preloader {
    pub fn new(config: &NavigationConfig, prefetcher: Arc<dyn IPrefetcher>) -> Self {
        let marks = Cache::builder()
            .max_capacity(config.max_preloaded_routes)
            .time_to_live(config.preload_timeout())
            .build();
        Self {
            prefetcher,
            marks,
            high_priority_threshold: config.high_priority_threshold,
            issued: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Prefetch `route` unless it is already marked. Returns whether a
    /// prefetch was issued. A failing prefetch is logged and leaves the
    /// route unmarked so a later trigger can retry it.
    pub fn preload(&self, route: &str, priority: PreloadPriority) -> bool {
        if self.is_preloaded(route) {
            return false;
        }
        match self.prefetcher.prefetch(route, priority) {
            Ok(()) => {
                self.marks.insert(route.to_string(), priority);
                self.issued.fetch_add(1, Ordering::Relaxed);
                events::preload_issued(route, priority.as_str());
                true
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(route = %route, error = %e, "route preload failed");
                false
            }
        }
    }

    /// Priority used for a prediction: high strictly above the
    /// high-priority threshold, low otherwise.
    pub fn priority_for(&self, probability: f64) -> PreloadPriority {
        if probability > self.high_priority_threshold {
            PreloadPriority::High
        } else {
            PreloadPriority::Low
        }
    }

    /// Preload every prediction. Returns how many prefetches were issued.
    pub fn preload_predictions(&self, predictions: &[RoutePrediction]) -> usize {
        predictions
            .iter()
            .filter(|p| self.preload(&p.route, self.priority_for(p.probability)))
            .count()
    }

    /// Predict from `current_route` and preload every surviving candidate.
    pub fn preload_predicted(
        &self,
        predictor: &RoutePredictor,
        patterns: &[NavigationPattern],
        current_route: &str,
        now: DateTime<Utc>,
    ) -> usize {
        let predictions = predictor.predict(patterns, current_route, now);
        self.preload_predictions(&predictions)
    }

    /// Whether `route` carries a live preload mark.
    pub fn is_preloaded(&self, route: &str) -> bool {
        self.marks.get(route).is_some()
    }

    /// Number of live marks.
    pub fn preloaded_count(&self) -> u64 {
        self.marks.run_pending_tasks();
        self.marks.entry_count()
    }

    /// Total prefetches issued since construction.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    /// Total prefetches that failed since construction.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Drop every mark.
    pub fn teardown(&self) {
        self.marks.invalidate_all();
    }
}
