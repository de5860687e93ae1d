// ==============================================
// CROSS-POLICY BEHAVIOR TESTS (integration)
// ==============================================
//
// Behavior every policy must share, plus the one ordering scenario per
// policy that tells them apart. Caches are built through the factory so the
// dispatch layer is covered too.

use cachelite::builder::{new_cache, CachePolicy, PolicyCache};
use cachelite::traits::{CoreCache, PeekCache};

fn k(s: &str) -> String {
    s.to_string()
}

fn cache(policy: CachePolicy, capacity: i64) -> PolicyCache<String, u32> {
    new_cache(policy, capacity)
}

// ==============================================
// Capacity
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn len_never_exceeds_capacity() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 10);
            for i in 0..1_000u32 {
                c.put(format!("key-{}", i % 37), i);
                if i % 5 == 0 {
                    c.get(&format!("key-{}", i % 11));
                }
                if i % 7 == 0 {
                    c.delete(&format!("key-{}", i % 13));
                }
                assert!(c.len() <= 10, "{} grew to {}", policy, c.len());
            }
            c.check_invariants().unwrap();
        }
    }

    #[test]
    fn capacity_zero_holds_nothing() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 0);
            for i in 0..10u32 {
                c.put(format!("{}", i), i);
                assert_eq!(c.len(), 0, "{}", policy);
            }
            assert_eq!(c.get(&k("0")), None);
            c.check_invariants().unwrap();
        }
    }

    #[test]
    fn negative_capacity_behaves_as_zero() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, -10);
            c.put(k("a"), 1);
            assert_eq!(c.capacity(), 0);
            assert!(c.is_empty());
        }
    }
}

// ==============================================
// Eviction Order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn lru_evicts_least_recently_used() {
        let mut c = cache(CachePolicy::Lru, 2);
        c.put(k("A"), 1);
        c.put(k("B"), 2);
        c.get(&k("A"));
        c.put(k("C"), 3);
        assert!(c.contains(&k("A")));
        assert!(!c.contains(&k("B")));
        assert!(c.contains(&k("C")));
    }

    #[test]
    fn lfu_evicts_least_frequently_used() {
        let mut c = cache(CachePolicy::Lfu, 2);
        c.put(k("A"), 1);
        c.put(k("B"), 2);
        c.get(&k("A"));
        c.get(&k("A"));
        c.get(&k("B"));
        c.put(k("C"), 3);
        assert!(c.contains(&k("A")));
        assert!(!c.contains(&k("B")));
        assert!(c.contains(&k("C")));
    }

    #[test]
    fn fifo_ignores_reads() {
        let mut c = cache(CachePolicy::Fifo, 2);
        c.put(k("A"), 1);
        c.put(k("B"), 2);
        c.get(&k("A"));
        c.put(k("C"), 3);
        assert!(!c.contains(&k("A")));
        assert!(c.contains(&k("B")));
        assert!(c.contains(&k("C")));
    }
}

// ==============================================
// Hit Rate & Clear
// ==============================================

mod accounting {
    use super::*;

    #[test]
    fn hit_rate_tracks_gets() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 4);
            assert_eq!(c.hit_rate(), 0.0);
            c.put(k("x"), 1);
            c.get(&k("x"));
            c.get(&k("y"));
            assert_eq!(c.hit_rate(), 0.5, "{}", policy);
        }
    }

    #[test]
    fn peek_and_contains_do_not_count() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 4);
            c.put(k("x"), 1);
            assert_eq!(c.peek(&k("x")), Some(&1));
            assert!(c.contains(&k("x")));
            assert!(!c.contains(&k("y")));
            assert_eq!(c.stats().lookups(), 0, "{}", policy);
        }
    }

    #[test]
    fn clear_is_idempotent_and_resets() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 4);
            c.put(k("x"), 1);
            c.get(&k("x"));
            c.clear();
            c.clear();
            assert_eq!(c.len(), 0);
            assert_eq!(c.hit_rate(), 0.0);
            c.check_invariants().unwrap();

            c.put(k("y"), 2);
            assert_eq!(c.get(&k("y")), Some(&2));
        }
    }
}

// ==============================================
// Delete & Re-insert
// ==============================================

mod delete_reinsert {
    use super::*;

    #[test]
    fn delete_then_put_carries_no_stale_state() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 2);
            c.put(k("a"), 1);
            for _ in 0..5 {
                c.get(&k("a"));
            }
            assert!(c.delete(&k("a")));
            assert!(!c.delete(&k("a")));
            assert_eq!(c.get(&k("a")), None);

            assert_eq!(c.put(k("a"), 2), None);
            assert_eq!(c.peek(&k("a")), Some(&2));
            c.check_invariants().unwrap();
        }
    }

    #[test]
    fn put_existing_returns_old_value_without_growing() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 2);
            c.put(k("a"), 1);
            assert_eq!(c.put(k("a"), 10), Some(1));
            assert_eq!(c.len(), 1);
            assert_eq!(c.peek(&k("a")), Some(&10));
        }
    }

    #[test]
    fn lfu_reinserted_key_starts_cold() {
        let mut c = cache(CachePolicy::Lfu, 2);
        c.put(k("a"), 1);
        for _ in 0..5 {
            c.get(&k("a"));
        }
        c.delete(&k("a"));
        c.put(k("a"), 1);
        c.put(k("b"), 2);
        c.get(&k("b"));
        c.put(k("c"), 3);
        assert!(!c.contains(&k("a")));
        assert!(c.contains(&k("b")));
    }
}

// ==============================================
// Side-Effect-Free Reads
// ==============================================

mod peek_contract {
    use super::*;
    use cachelite::policy::fifo::FifoCache;
    use cachelite::policy::lfu::LfuCache;
    use cachelite::policy::lru::LruCache;

    fn read_through_interface<C: PeekCache<String, u32>>(cache: &C) -> (bool, Option<u32>) {
        let key = k("a");
        (cache.contains(&key), cache.peek(&key).copied())
    }

    fn fill<C: PeekCache<String, u32>>(mut cache: C) -> C {
        cache.put(k("a"), 1);
        cache
    }

    #[test]
    fn peek_agrees_with_contains_for_every_cache_type() {
        let expected = (true, Some(1));
        assert_eq!(read_through_interface(&fill(LruCache::new(4))), expected);
        assert_eq!(read_through_interface(&fill(LfuCache::new(4))), expected);
        assert_eq!(read_through_interface(&fill(FifoCache::new(4))), expected);
        for policy in CachePolicy::ALL {
            let c = fill(cache(policy, 4));
            assert_eq!(read_through_interface(&c), expected, "{}", policy);
            assert_eq!(c.stats().lookups(), 0);
        }
    }

    #[test]
    fn peek_misses_agree_with_contains() {
        for policy in CachePolicy::ALL {
            let mut c = cache(policy, 1);
            c.put(k("a"), 1);
            c.put(k("b"), 2);
            assert_eq!(read_through_interface(&c), (false, None), "{}", policy);
        }
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn thread_safe_peek_with_agrees_with_contains() {
        use cachelite::builder::new_thread_safe_cache;

        for policy in CachePolicy::ALL {
            let c = new_thread_safe_cache::<String, u32>(policy, 4);
            c.put(k("a"), 1);
            assert!(c.contains(&k("a")));
            assert_eq!(c.peek_with(&k("a"), |v: &u32| *v), Some(1), "{}", policy);
            assert_eq!(c.peek_with(&k("z"), |v: &u32| *v), None);
            assert_eq!(c.stats().lookups(), 0);
        }
    }
}
