//! Feeds route changes into pattern learning and prefetching.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use aula_core::config::NavigationConfig;
use aula_core::{IClock, IDurableStore, IPrefetcher};
use aula_observability::navigation_span;

use crate::predictor::{RoutePrediction, RoutePredictor};
use crate::preloader::Preloader;
use crate::store::PatternStore;

pub struct NavigationTracker {
    store: PatternStore,
    predictor: RoutePredictor,
    preloader: Arc<Preloader>,
    clock: Arc<dyn IClock>,
    current: Option<(String, DateTime<Utc>)>,
}

impl NavigationTracker {
    /// Build a tracker and hydrate the pattern table from `store`.
    pub fn new(
        config: &NavigationConfig,
        store: Arc<dyn IDurableStore>,
        prefetcher: Arc<dyn IPrefetcher>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        Self {
            store: PatternStore::open(config, store, Arc::clone(&clock)),
            predictor: RoutePredictor::from_config(config),
            preloader: Arc::new(Preloader::new(config, prefetcher)),
            clock,
            current: None,
        }
    }

    /// The user navigated to `route`. Records the transition from the
    /// previous route and preloads what is likely next. Returns how many
    /// prefetches were issued.
    pub fn on_route_change(&mut self, route: &str) -> usize {
        let _span = navigation_span!(route).entered();
        let now = self.clock.now();

        if let Some((previous, entered_at)) = self.current.take() {
            if previous == route {
                self.current = Some((previous, entered_at));
                return 0;
            }
            let time_spent = (now - entered_at).to_std().unwrap_or_default();
            self.store.record(&previous, route, time_spent);
        }
        self.current = Some((route.to_string(), now));

        self.preloader
            .preload_predicted(&self.predictor, self.store.patterns(), route, now)
    }

    /// Predictions for `route` at the current time.
    pub fn predict(&self, route: &str) -> Vec<RoutePrediction> {
        self.predictor
            .predict(self.store.patterns(), route, self.clock.now())
    }

    /// Preload predictions for the current route, if any.
    pub fn preload_predicted(&self) -> usize {
        match &self.current {
            Some((route, _)) => self.preloader.preload_predicted(
                &self.predictor,
                self.store.patterns(),
                route,
                self.clock.now(),
            ),
            None => 0,
        }
    }

    pub fn current_route(&self) -> Option<&str> {
        self.current.as_ref().map(|(route, _)| route.as_str())
    }

    pub fn patterns(&self) -> &PatternStore {
        &self.store
    }

    pub fn patterns_mut(&mut self) -> &mut PatternStore {
        &mut self.store
    }

    /// Shared handle for hover and visibility triggers.
    pub fn preloader(&self) -> Arc<Preloader> {
        Arc::clone(&self.preloader)
    }

    pub fn teardown(&self) {
        self.preloader.teardown();
    }
}
