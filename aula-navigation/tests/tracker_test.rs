use std::sync::Arc;

use chrono::Duration;

use aula_core::config::NavigationConfig;
use aula_core::{IPrefetcher, ManualClock, PreloadPriority};
use aula_fixtures::{epoch, RecordingPrefetcher};
use aula_navigation::{HttpPrefetcher, NavigationTracker};
use aula_storage::MemoryStore;

fn tracker() -> (NavigationTracker, Arc<RecordingPrefetcher>, Arc<ManualClock>) {
    let prefetcher = Arc::new(RecordingPrefetcher::new());
    let clock = Arc::new(ManualClock::new(epoch()));
    let tracker = NavigationTracker::new(
        &NavigationConfig::default(),
        Arc::new(MemoryStore::new()),
        prefetcher.clone(),
        clock.clone(),
    );
    (tracker, prefetcher, clock)
}

#[test]
fn first_navigation_only_sets_current_route() {
    let (mut tracker, prefetcher, _) = tracker();
    assert_eq!(tracker.on_route_change("/profesor"), 0);
    assert_eq!(tracker.current_route(), Some("/profesor"));
    assert!(tracker.patterns().is_empty());
    assert_eq!(prefetcher.call_count(), 0);
}

#[test]
fn transitions_are_recorded_with_time_spent() {
    let (mut tracker, _, clock) = tracker();
    tracker.on_route_change("/profesor");
    clock.advance(Duration::seconds(42));
    tracker.on_route_change("/profesor/asistencia");

    let p = tracker
        .patterns()
        .get("/profesor", "/profesor/asistencia")
        .unwrap();
    assert_eq!(p.frequency, 1);
    assert_eq!(p.avg_time_ms, 42_000);
}

#[test]
fn returning_to_a_route_preloads_learned_next_step() {
    let (mut tracker, prefetcher, clock) = tracker();
    tracker.on_route_change("/profesor");
    clock.advance(Duration::seconds(5));
    tracker.on_route_change("/profesor/planificaciones");
    clock.advance(Duration::seconds(5));

    let issued = tracker.on_route_change("/profesor");

    assert_eq!(issued, 1);
    assert_eq!(
        prefetcher.calls(),
        vec![("/profesor/planificaciones".to_string(), PreloadPriority::High)]
    );
}

#[test]
fn same_route_is_not_a_transition() {
    let (mut tracker, _, _) = tracker();
    tracker.on_route_change("/admin");
    tracker.on_route_change("/admin");
    assert!(tracker.patterns().is_empty());
}

#[test]
fn preload_predicted_without_current_route_is_noop() {
    let (tracker, prefetcher, _) = tracker();
    assert_eq!(tracker.preload_predicted(), 0);
    assert_eq!(prefetcher.call_count(), 0);
}

#[test]
fn http_prefetcher_requires_runtime_and_absolute_route() {
    let prefetcher = HttpPrefetcher::new("http://127.0.0.1:9/").unwrap();
    assert_eq!(prefetcher.url_for("/admin"), "http://127.0.0.1:9/admin");
    assert!(prefetcher.prefetch("admin", PreloadPriority::Low).is_err());
    assert!(prefetcher.prefetch("/admin", PreloadPriority::Low).is_err());
}

#[tokio::test]
async fn http_prefetcher_is_fire_and_forget() {
    let prefetcher = HttpPrefetcher::new("http://127.0.0.1:9").unwrap();
    assert!(prefetcher.prefetch("/admin", PreloadPriority::High).is_ok());
}
