//! # aula-navigation
//!
//! Learns how users move through the portal and prefetches the routes
//! they are likely to open next.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`PatternStore`] | Bounded, persisted `from → to` transition table |
//! | [`RoutePredictor`] | Recency-weighted ranking of next routes |
//! | [`Preloader`] | Deduplicated, self-expiring prefetch hints |
//! | [`HoverTrigger`] / [`VisibilityTrigger`] | Prefetch on link hover (debounced) or visibility |
//! | [`NavigationTracker`] | Wires the above to route changes |
//!
//! Everything here is a best-effort optimization: storage and network
//! failures are logged and swallowed.

pub mod predictor;
pub mod prefetcher;
pub mod preloader;
pub mod store;
pub mod tracker;
pub mod triggers;

pub use predictor::{recency_score, RoutePrediction, RoutePredictor};
pub use prefetcher::HttpPrefetcher;
pub use preloader::Preloader;
pub use store::PatternStore;
pub use tracker::NavigationTracker;
pub use triggers::{HoverTrigger, VisibilityTrigger};
