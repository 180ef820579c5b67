//! Property and concurrency tests for ActivityCache.

use commitcrunch::domain::models::DayRecord;
use commitcrunch::services::ActivityCache;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn series(tag: u32) -> Vec<DayRecord> {
    vec![DayRecord::new(format!("2024-01-{:02}", tag % 28 + 1), tag)]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    Set(u8, u32),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<u8>().prop_map(|k| Op::Get(k % 32)),
        6 => (any::<u8>(), any::<u32>()).prop_map(|(k, v)| Op::Set(k % 32, v)),
        1 => Just(Op::Clear),
    ]
}

#[tokio::test]
async fn test_threshold_reset_keeps_only_new_entry() {
    let cache = ActivityCache::new(100);

    for i in 0..=100 {
        cache.set(format!("user-{i}"), series(i)).await;
    }
    assert_eq!(cache.len().await, 101);

    cache.set("newcomer", series(7)).await;

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("newcomer").await, Some(series(7)));
    for i in 0..=100 {
        assert!(cache.get(&format!("user-{i}")).await.is_none());
    }
}

#[tokio::test]
async fn test_overwriting_at_threshold_does_not_reset() {
    let cache = ActivityCache::new(2);
    cache.set("a", series(1)).await;
    cache.set("b", series(2)).await;
    cache.set("c", series(3)).await;

    // Three entries is over the threshold of two, so this write resets.
    cache.set("a", series(4)).await;
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("a").await, Some(series(4)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_get_after_set(keys in prop::collection::vec("[a-z]{1,12}", 1..20)) {
        let rt = runtime();
        rt.block_on(async {
            let cache = ActivityCache::new(100);
            for (i, key) in keys.iter().enumerate() {
                let value = series(u32::try_from(i).unwrap());
                cache.set(key.clone(), value.clone()).await;
                prop_assert_eq!(cache.get(key).await, Some(value));
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_unset_keys_miss_and_clear_empties(
        keys in prop::collection::hash_set("[a-z]{1,8}", 1..30),
        absent in "[A-Z]{1,8}",
    ) {
        let rt = runtime();
        rt.block_on(async {
            let cache = ActivityCache::new(100);
            for key in &keys {
                cache.set(key.clone(), series(1)).await;
            }
            // Upper-case keys never collide with the lower-case keys.
            prop_assert!(cache.get(&absent).await.is_none());

            cache.clear().await;
            for key in &keys {
                prop_assert!(cache.get(key).await.is_none());
            }
            prop_assert!(cache.is_empty().await);
            Ok(())
        })?;
    }

    #[test]
    fn prop_size_never_exceeds_threshold_plus_one(
        threshold in 1usize..10,
        keys in prop::collection::vec(0u16..500, 1..200),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let cache = ActivityCache::new(threshold);
            for key in keys {
                cache.set(key.to_string(), series(u32::from(key))).await;
                let len = cache.len().await;
                prop_assert!(len <= threshold + 1);
                prop_assert!(len >= 1);
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_concurrent_ops_are_safe(ops in prop::collection::vec(op_strategy(), 1..300)) {
        let rt = runtime();
        let threshold = 8;
        rt.block_on(async {
            let cache = Arc::new(ActivityCache::new(threshold));

            let handles: Vec<_> = ops
                .into_iter()
                .map(|op| {
                    let cache = cache.clone();
                    tokio::spawn(async move {
                        match op {
                            Op::Get(k) => {
                                if let Some(found) = cache.get(&k.to_string()).await {
                                    assert_eq!(found.len(), 1);
                                }
                            }
                            Op::Set(k, v) => cache.set(k.to_string(), series(v)).await,
                            Op::Clear => cache.clear().await,
                        }
                        let len = cache.len().await;
                        assert!(len <= threshold + 1, "cache grew to {len}");
                    })
                })
                .collect();

            let joined = tokio::time::timeout(
                Duration::from_secs(10),
                futures::future::join_all(handles),
            )
            .await;
            prop_assert!(joined.is_ok(), "operations deadlocked");
            for result in joined.unwrap() {
                prop_assert!(result.is_ok(), "operation panicked");
            }

            prop_assert!(cache.len().await <= threshold + 1);
            cache.set("final", series(1)).await;
            prop_assert_eq!(cache.get("final").await, Some(series(1)));
            Ok(())
        })?;
    }
}
