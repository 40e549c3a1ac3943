use std::sync::Arc;

use chrono::Duration;

use aula_cache::IntelligentCache;
use aula_core::config::CacheConfig;
use aula_core::{IDurableStore, ManualClock};
use aula_fixtures::{epoch, FailingStore};
use aula_storage::MemoryStore;

fn config(max_size: usize, max_age_secs: u64) -> CacheConfig {
    CacheConfig {
        max_size,
        max_age_secs,
        ..Default::default()
    }
}

fn persistent(max_size: usize, max_age_secs: u64, compress: bool) -> CacheConfig {
    CacheConfig {
        persistent: true,
        compress,
        ..config(max_size, max_age_secs)
    }
}

// ── LRU eviction ──────────────────────────────────────────────────────────

#[test]
fn least_recently_accessed_entry_is_evicted() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache = IntelligentCache::new(config(2, 300), clock.clone());

    cache.set("a", 1);
    cache.set("b", 2);
    assert_eq!(cache.get("a"), Some(1));
    cache.set("c", 3);

    assert_eq!(cache.len(), 2);
    assert!(!cache.contains("b"), "b was least recently accessed");
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.get("c"), Some(3));
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn eviction_follows_last_access_time() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache = IntelligentCache::new(config(3, 3_600), clock.clone());

    cache.set("asistencia", 1);
    clock.advance(Duration::seconds(1));
    cache.set("notas", 2);
    clock.advance(Duration::seconds(1));
    cache.set("horario", 3);
    clock.advance(Duration::seconds(1));
    cache.get("asistencia");
    clock.advance(Duration::seconds(1));
    cache.set("anotaciones", 4);

    let mut keys = cache.keys();
    keys.sort();
    assert_eq!(keys, vec!["anotaciones", "asistencia", "horario"]);
}

// ── Expiry ────────────────────────────────────────────────────────────────

#[test]
fn entry_visible_until_max_age_then_purged() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache = IntelligentCache::new(config(10, 60), clock.clone());
    cache.set("dashboard", 42);

    clock.advance(Duration::seconds(59));
    assert_eq!(cache.get("dashboard"), Some(42));

    clock.advance(Duration::seconds(1));
    assert_eq!(cache.get("dashboard"), None);
    assert!(cache.is_empty(), "expired entry purged on access");
}

#[test]
fn access_does_not_extend_lifetime() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache = IntelligentCache::new(config(10, 10), clock.clone());
    cache.set("k", 1);
    for _ in 0..9 {
        clock.advance(Duration::seconds(1));
        assert_eq!(cache.get("k"), Some(1));
    }
    clock.advance(Duration::seconds(1));
    assert_eq!(cache.get("k"), None);
}

#[test]
fn purge_expired_removes_only_stale_entries() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache = IntelligentCache::new(config(10, 30), clock.clone());
    cache.set("old", 1);
    clock.advance(Duration::seconds(20));
    cache.set("new", 2);
    clock.advance(Duration::seconds(15));

    assert!(!cache.contains("old"));
    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.keys(), vec!["new".to_string()]);
}

#[test]
fn get_or_insert_with_fetches_once() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache = IntelligentCache::new(config(10, 30), clock);
    let mut fetches = 0;
    for _ in 0..3 {
        let value = cache
            .get_or_insert_with("cursos", || {
                fetches += 1;
                Ok(vec!["1°A".to_string(), "1°B".to_string()])
            })
            .unwrap();
        assert_eq!(value.len(), 2);
    }
    assert_eq!(fetches, 1);
}

#[test]
fn get_or_insert_with_propagates_fetch_error() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache: IntelligentCache<u32> = IntelligentCache::new(config(10, 30), clock);
    let result = cache.get_or_insert_with("x", || {
        Err(aula_core::AulaError::Config {
            reason: "boom".into(),
        })
    });
    assert!(result.is_err());
    assert!(cache.is_empty());
}

// ── Persistence ───────────────────────────────────────────────────────────

#[test]
fn persistent_cache_rehydrates_live_entries() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());

    {
        let mut cache = IntelligentCache::with_store(persistent(10, 60, false), clock.clone(), store.clone());
        cache.set("old", "viejo".to_string());
        clock.advance(Duration::seconds(45));
        cache.set("fresh", "nuevo".to_string());
    }
    assert!(store.read("intelligent-cache").unwrap().is_some());

    clock.advance(Duration::seconds(30));
    let mut restored: IntelligentCache<String> =
        IntelligentCache::with_store(persistent(10, 60, false), clock.clone(), store.clone());

    assert_eq!(restored.len(), 1, "entry older than max_age dropped on load");
    assert_eq!(restored.get("fresh").as_deref(), Some("nuevo"));
}

#[test]
fn compressed_payload_is_base64_and_roundtrips() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let store = Arc::new(MemoryStore::new());

    let mut cache = IntelligentCache::with_store(persistent(10, 60, false), clock.clone(), store.clone());
    let mut compressed_cfg = persistent(10, 60, false);
    compressed_cfg.storage_key = "cache-compressed".into();
    compressed_cfg.compress = true;
    let mut compressed = IntelligentCache::with_store(compressed_cfg.clone(), clock.clone(), store.clone());

    cache.set("k", 7u32);
    compressed.set("k", 7u32);

    let plain = store.read("intelligent-cache").unwrap().unwrap();
    let encoded = store.read("cache-compressed").unwrap().unwrap();
    assert!(plain.starts_with('{'));
    assert!(!encoded.contains('{'));

    let mut restored: IntelligentCache<u32> =
        IntelligentCache::with_store(compressed_cfg, clock, store);
    assert_eq!(restored.get("k"), Some(7));
}

#[test]
fn clear_erases_persisted_copy() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let store = Arc::new(MemoryStore::new());
    let mut cache = IntelligentCache::with_store(persistent(10, 60, false), clock, store.clone());
    cache.set("k", 1u8);
    assert!(store.read("intelligent-cache").unwrap().is_some());

    cache.clear();
    assert!(cache.is_empty());
    assert!(store.read("intelligent-cache").unwrap().is_none());
}

#[test]
fn non_persistent_cache_never_touches_store() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let store = Arc::new(MemoryStore::new());
    let mut cache = IntelligentCache::with_store(config(10, 60), clock, store.clone());
    cache.set("k", 1u8);
    assert!(store.is_empty());
}

#[test]
fn corrupt_persisted_state_is_treated_as_empty() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let store = Arc::new(MemoryStore::new());
    store.write("intelligent-cache", "not json at all").unwrap();

    let mut cache: IntelligentCache<u8> =
        IntelligentCache::with_store(persistent(10, 60, false), clock, store);
    assert!(cache.is_empty());
    cache.set("k", 1);
    assert_eq!(cache.get("k"), Some(1));
}

#[test]
fn storage_failures_are_swallowed() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut cache = IntelligentCache::with_store(persistent(2, 60, false), clock, Arc::new(FailingStore));
    cache.set("a", 1u8);
    cache.set("b", 2u8);
    cache.set("c", 3u8);
    assert_eq!(cache.get("c"), Some(3));
    assert!(cache.remove("c"));
    assert!(!cache.remove("c"));
    cache.clear();
    assert!(cache.is_empty());
}
