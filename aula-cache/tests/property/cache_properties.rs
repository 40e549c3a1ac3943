use std::sync::Arc;

use chrono::Duration;
use proptest::prelude::*;

use aula_cache::IntelligentCache;
use aula_core::config::CacheConfig;
use aula_core::ManualClock;
use aula_fixtures::epoch;

#[derive(Debug, Clone)]
enum Op {
    Set(u8),
    Get(u8),
    Tick(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::Set),
        (0u8..12).prop_map(Op::Get),
        (0i64..5).prop_map(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn size_bounded_and_victim_is_least_recent(max_size in 1usize..6, ops in prop::collection::vec(op(), 1..64)) {
        let clock = Arc::new(ManualClock::new(epoch()));
        let config = CacheConfig { max_size, max_age_secs: 86_400, ..Default::default() };
        let mut cache: IntelligentCache<u8> = IntelligentCache::new(config, clock.clone());

        for op in ops {
            match op {
                Op::Set(k) => {
                    let key = k.to_string();
                    let before: Vec<(String, chrono::DateTime<chrono::Utc>)> = cache
                        .keys()
                        .into_iter()
                        .filter(|existing| existing != &key)
                        .filter_map(|existing| cache.entry(&existing).map(|e| (existing.clone(), e.last_access)))
                        .collect();
                    cache.set(key.clone(), k);
                    prop_assert!(cache.len() <= max_size);

                    let evicted: Vec<_> = before
                        .iter()
                        .filter(|(existing, _)| !cache.keys().contains(existing))
                        .collect();
                    if let Some((_, evicted_at)) = evicted.first() {
                        let oldest = before.iter().map(|(_, at)| *at).min().unwrap();
                        prop_assert_eq!(*evicted_at, oldest);
                    }
                }
                Op::Get(k) => {
                    cache.get(&k.to_string());
                }
                Op::Tick(secs) => clock.advance(Duration::seconds(secs)),
            }
        }
    }

    #[test]
    fn visible_strictly_before_max_age(max_age in 1i64..120, read_at in 0i64..240) {
        let clock = Arc::new(ManualClock::new(epoch()));
        let config = CacheConfig { max_size: 4, max_age_secs: max_age as u64, ..Default::default() };
        let mut cache = IntelligentCache::new(config, clock.clone());
        cache.set("k", 1u8);
        clock.advance(Duration::seconds(read_at));
        let hit = cache.get("k").is_some();
        prop_assert_eq!(hit, read_at < max_age);
    }
}
