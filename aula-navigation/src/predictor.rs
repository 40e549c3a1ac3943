//! Ranks likely next routes from the pattern table.
//!
//! Score per candidate: `frequency × 1 / (days_since_last_access + 1)`.
//! Probability per candidate: `frequency / Σ frequency` over all
//! candidates leaving the current route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aula_core::config::NavigationConfig;
use aula_core::models::NavigationPattern;

/// A predicted next route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePrediction {
    pub route: String,
    /// Share of observed departures from the current route (0.0–1.0).
    pub probability: f64,
    /// Average time spent on the current route before this transition.
    #[serde(rename = "avgTime")]
    pub avg_time_ms: u64,
    /// Recency-weighted ranking score.
    pub score: f64,
}

/// Recency-weighted score of a pattern at `now`.
pub fn recency_score(pattern: &NavigationPattern, now: DateTime<Utc>) -> f64 {
    pattern.frequency as f64 * (1.0 / (pattern.days_since_access(now) + 1.0))
}

#[derive(Debug, Clone, Copy)]
pub struct RoutePredictor {
    threshold: f64,
}

impl RoutePredictor {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(config.prediction_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Predict next routes from `current_route`, highest score first.
    /// Candidates below the probability threshold are dropped.
    pub fn predict(
        &self,
        patterns: &[NavigationPattern],
        current_route: &str,
        now: DateTime<Utc>,
    ) -> Vec<RoutePrediction> {
        let mut candidates: Vec<(&NavigationPattern, f64)> = patterns
            .iter()
            .filter(|p| p.from == current_route)
            .map(|p| (p, recency_score(p, now)))
            .collect();

        let total: f64 = candidates.iter().map(|(p, _)| p.frequency as f64).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        // Stable: equal scores keep input order.
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        candidates
            .into_iter()
            .map(|(p, score)| RoutePrediction {
                route: p.to.clone(),
                probability: p.frequency as f64 / total,
                avg_time_ms: p.avg_time_ms,
                score,
            })
            .filter(|prediction| prediction.probability >= self.threshold)
            .collect()
    }
}

impl Default for RoutePredictor {
    fn default() -> Self {
        Self::from_config(&NavigationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn score_halves_after_one_day() {
        let now = Utc::now();
        let fresh = NavigationPattern::new("/a", "/b", 0, now);
        let stale = NavigationPattern::new("/a", "/c", 0, now - Duration::days(1));
        assert!((recency_score(&fresh, now) - 1.0).abs() < 1e-9);
        assert!((recency_score(&stale, now) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn no_candidates_yields_empty() {
        let predictor = RoutePredictor::new(0.0);
        assert!(predictor.predict(&[], "/admin", Utc::now()).is_empty());
    }
}
