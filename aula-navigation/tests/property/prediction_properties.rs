use chrono::Duration;
use proptest::prelude::*;

use aula_core::models::NavigationPattern;
use aula_fixtures::{epoch, pattern};
use aula_navigation::{recency_score, RoutePredictor};

proptest! {
    #[test]
    fn older_access_never_scores_higher(frequency in 1u32..1_000, a in 0i64..10_000_000, b in 0i64..10_000_000) {
        let now = epoch();
        let (newer, older) = if a <= b { (a, b) } else { (b, a) };
        let fresh = pattern("/x", "/y", frequency, now - Duration::seconds(newer));
        let stale = pattern("/x", "/z", frequency, now - Duration::seconds(older));
        prop_assert!(recency_score(&fresh, now) >= recency_score(&stale, now));
    }

    #[test]
    fn predictions_respect_threshold(
        threshold in 0.0f64..1.0,
        edges in prop::collection::vec((0u8..6, 1u32..50, 0i64..30), 0..24),
    ) {
        let now = epoch();
        let patterns: Vec<NavigationPattern> = edges
            .iter()
            .map(|(to, freq, days)| pattern("/inicio", &format!("/r{to}"), *freq, now - Duration::days(*days)))
            .collect();

        let predictions = RoutePredictor::new(threshold).predict(&patterns, "/inicio", now);
        for window in predictions.windows(2) {
            prop_assert!(window[0].score >= window[1].score);
        }
        for p in &predictions {
            prop_assert!(p.probability >= threshold);
            prop_assert!(p.probability <= 1.0 + 1e-9);
        }
    }
}
