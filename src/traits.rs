//! # Cache Trait Hierarchy
//!
//! One behavioral contract shared by every eviction policy, plus small
//! policy-specific extensions for callers that need to inspect the victim
//! order.
//!
//! ## Architecture
//!
//! ```text
//!                        ┌─────────────────────────────────────────┐
//!                        │            CoreCache<K, V>              │
//!                        │                                         │
//!                        │  get(&mut, &K) → Option<&V>             │
//!                        │  put(&mut, K, V) → Option<V>            │
//!                        │  delete(&mut, &K) → bool                │
//!                        │  clear(&mut)                            │
//!                        │  len / capacity / hit_rate              │
//!                        │  contains (no state change)             │
//!                        │  check_invariants → Result<(), _>       │
//!                        └──────────────────┬──────────────────────┘
//!                                           │
//!          ┌────────────────────────────────┼────────────────────────────────┐
//!          ▼                                ▼                                ▼
//!  ┌──────────────────────┐      ┌──────────────────────┐      ┌──────────────────────┐
//!  │  LruCacheTrait       │      │  LfuCacheTrait       │      │  FifoCacheTrait      │
//!  │  peek_lru / pop_lru  │      │  peek_lfu / pop_lfu  │      │  peek_oldest         │
//!  │  recency_rank        │      │  frequency           │      │  pop_oldest          │
//!  └──────────────────────┘      └──────────────────────┘      └──────────────────────┘
//! ```
//!
//! [`PeekCache`] adds borrowed, side-effect-free reads. It is separate from
//! `CoreCache` because a lock-guarded cache cannot hand out a reference that
//! outlives its guard; [`ThreadSafeCache`](crate::concurrent::ThreadSafeCache)
//! offers `peek_with` instead.
//!
//! ## Policy Comparison
//!
//! | Policy | Eviction Basis          | `get` side effect        | Eviction check        |
//! |--------|-------------------------|--------------------------|-----------------------|
//! | LRU    | Last access or insert   | move to front            | after insert          |
//! | LFU    | Access count            | freq += 1, local promote | before insert         |
//! | FIFO   | Insertion order         | none                     | after insert          |
//!
//! ## Thread Safety
//!
//! - Policy caches are **NOT thread-safe**: every mutation needs `&mut self`.
//! - [`ThreadSafeCache`](crate::concurrent::ThreadSafeCache) wraps any
//!   `CoreCache` in a lock and is marked with [`ConcurrentCache`].

use crate::error::InvariantError;
use crate::stats::HitStats;

/// Core cache operations that every policy supports.
///
/// Absence is never an error: a missing key yields `None` from
/// [`get`](Self::get) and `false` from [`delete`](Self::delete).
///
/// # Example
///
/// ```
/// use cachelite::policy::lru::LruCache;
/// use cachelite::traits::CoreCache;
///
/// fn warm<C: CoreCache<String, u32>>(cache: &mut C, data: &[(&str, u32)]) {
///     for (key, value) in data {
///         cache.put(key.to_string(), *value);
///     }
/// }
///
/// let mut cache = LruCache::new(8);
/// warm(&mut cache, &[("a", 1), ("b", 2)]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Looks up `key`, updating recency/frequency state on a hit.
    ///
    /// Every call counts as exactly one hit or one miss.
    ///
    /// # Example
    ///
    /// ```
    /// use cachelite::policy::lru::LruCache;
    /// use cachelite::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(4);
    /// cache.put("k".to_string(), 1);
    /// assert_eq!(cache.get(&"k".to_string()), Some(&1));
    /// assert_eq!(cache.get(&"missing".to_string()), None);
    /// assert_eq!(cache.hit_rate(), 0.5);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Inserts or replaces `key`, returning the replaced value.
    ///
    /// Inserting a new key may evict another entry so that
    /// `len() <= capacity()` holds once the call returns.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`; returns `true` if it was present.
    fn delete(&mut self, key: &K) -> bool;

    /// Removes every entry and resets hit/miss counters.
    fn clear(&mut self);

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries; fixed at construction.
    fn capacity(&self) -> usize;

    /// Hit/miss counters since construction or the last `clear`.
    fn stats(&self) -> HitStats;

    /// `hits / (hits + misses)`, or `0.0` before the first `get`.
    fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// Checks for `key` without touching eviction order or counters.
    fn contains(&self, key: &K) -> bool;

    /// Walks the internal structures and reports the first inconsistency.
    fn check_invariants(&self) -> Result<(), InvariantError>;
}

/// Borrowed reads that leave eviction order and counters untouched.
///
/// For every key, `peek(key).is_some() == contains(key)`.
///
/// # Example
///
/// ```
/// use cachelite::policy::fifo::FifoCache;
/// use cachelite::traits::{CoreCache, PeekCache};
///
/// fn snapshot<C: PeekCache<u32, String>>(cache: &C, keys: &[u32]) -> Vec<Option<String>> {
///     keys.iter().map(|k| cache.peek(k).cloned()).collect()
/// }
///
/// let mut cache = FifoCache::new(4);
/// cache.put(1, "one".to_string());
/// assert_eq!(snapshot(&cache, &[1, 2]), vec![Some("one".to_string()), None]);
/// assert_eq!(cache.stats().lookups(), 0);
/// ```
pub trait PeekCache<K, V>: CoreCache<K, V> {
    /// Reads `key` without touching eviction order or counters.
    fn peek(&self, key: &K) -> Option<&V>;
}

/// LRU-specific inspection and eviction.
pub trait LruCacheTrait<K, V>: CoreCache<K, V> {
    /// Entry that would be evicted next, without changing order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Position of `key` counted from the most recently used end (0-based).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// LFU-specific inspection and eviction.
pub trait LfuCacheTrait<K, V>: CoreCache<K, V> {
    /// Entry that would be evicted next, without changing order.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Removes and returns the least frequently used entry.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Current access count of `key` (1 right after insertion).
    fn frequency(&self, key: &K) -> Option<u64>;
}

/// FIFO-specific inspection and eviction.
pub trait FifoCacheTrait<K, V>: CoreCache<K, V> {
    /// Oldest live entry, without removing it.
    fn peek_oldest(&self) -> Option<(&K, &V)>;

    /// Removes and returns the oldest live entry.
    fn pop_oldest(&mut self) -> Option<(K, V)>;
}

/// Marker for caches that can be shared between threads.
///
/// # Example
///
/// ```
/// use cachelite::traits::{ConcurrentCache, CoreCache};
///
/// fn share<C: ConcurrentCache>(_cache: &C) {}
/// ```
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;

    // Vec-backed FIFO used only to exercise the default methods.
    struct MockCache {
        data: Vec<(i32, String)>,
        capacity: usize,
        stats: HitStats,
    }

    impl MockCache {
        fn new(capacity: usize) -> Self {
            Self {
                data: Vec::new(),
                capacity,
                stats: HitStats::new(),
            }
        }
    }

    impl CoreCache<i32, String> for MockCache {
        fn get(&mut self, key: &i32) -> Option<&String> {
            match self.data.iter().position(|(k, _)| k == key) {
                Some(idx) => {
                    self.stats.record_hit();
                    Some(&self.data[idx].1)
                },
                None => {
                    self.stats.record_miss();
                    None
                },
            }
        }

        fn put(&mut self, key: i32, value: String) -> Option<String> {
            if let Some((_, existing)) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(existing, value));
            }
            self.data.push((key, value));
            while self.data.len() > self.capacity {
                self.data.remove(0);
            }
            None
        }

        fn delete(&mut self, key: &i32) -> bool {
            let before = self.data.len();
            self.data.retain(|(k, _)| k != key);
            before != self.data.len()
        }

        fn clear(&mut self) {
            self.data.clear();
            self.stats.reset();
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn stats(&self) -> HitStats {
            self.stats
        }

        fn contains(&self, key: &i32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn check_invariants(&self) -> Result<(), InvariantError> {
            if self.data.len() > self.capacity {
                return Err(InvariantError::new("over capacity"));
            }
            Ok(())
        }
    }

    impl PeekCache<i32, String> for MockCache {
        fn peek(&self, key: &i32) -> Option<&String> {
            self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }
    }

    #[test]
    fn default_is_empty_follows_len() {
        let mut cache = MockCache::new(2);
        assert!(cache.is_empty());
        cache.put(1, "one".to_string());
        assert!(!cache.is_empty());
    }

    #[test]
    fn default_hit_rate_uses_stats() {
        let mut cache = MockCache::new(2);
        assert_eq!(cache.hit_rate(), 0.0);
        cache.put(1, "one".to_string());
        cache.get(&1);
        cache.get(&2);
        assert_eq!(cache.hit_rate(), 0.5);
        cache.clear();
        assert_eq!(cache.hit_rate(), 0.0);
    }

    #[test]
    fn put_returns_previous_value() {
        let mut cache = MockCache::new(2);
        assert_eq!(cache.put(1, "first".to_string()), None);
        assert_eq!(cache.put(1, "second".to_string()), Some("first".to_string()));
        assert_eq!(cache.peek(&1), Some(&"second".to_string()));
        assert!(cache.check_invariants().is_ok());
    }
}
