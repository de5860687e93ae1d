//! # FIFO (First In, First Out) Cache
//!
//! Evicts in insertion order. Reads never reorder anything; replacing the
//! value of an existing key keeps its original place in line.
//!
//! ## Architecture
//!
//! ```text
//!   order: VecDeque<(K, seq)>                 map: FxHashMap<K, Slot<V>>
//!   ┌──────────────────────────────────┐      ┌─────────┬───────────────┐
//!   │ (a,0) (b,1) (c,2) (b,3) (d,4)    │      │ a       │ value, seq 0  │
//!   │   ▲     ▲                        │      │ b       │ value, seq 3  │
//!   │ oldest  stale: b was deleted and │      │ d       │ value, seq 4  │
//!   │         re-inserted as seq 3     │      └─────────┴───────────────┘
//!   └──────────────────────────────────┘      (c was deleted)
//! ```
//!
//! ## Lazy Queue Cleanup
//!
//! `delete` only touches the map. The queue keeps the dead `(key, seq)` pair
//! until eviction pops it; a popped pair is live only if the map still holds
//! that key *with the same sequence number*, so a key that was deleted and
//! re-inserted is never evicted through its old queue position. Stale pops
//! do not count toward the number evicted.
//!
//! When dead pairs outnumber live ones (queue longer than twice the map plus
//! a small slack) the queue is compacted in one pass, keeping memory bounded
//! under delete-heavy workloads.
//!
//! ## Thread Safety
//!
//! `FifoCache` is **NOT thread-safe**. Wrap it in
//! [`ThreadSafeCache`](crate::concurrent::ThreadSafeCache) to share it.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, FifoMetricsRecorder,
    MetricsSnapshotProvider,
};
use crate::policy::prealloc_hint;
use crate::stats::HitStats;
use crate::traits::{CoreCache, FifoCacheTrait, PeekCache};

/// Queue length above which compaction is considered at all.
const COMPACT_SLACK: usize = 32;

#[derive(Debug)]
struct Slot<V> {
    value: V,
    seq: u64,
}

/// FIFO cache over an insertion queue and a flat map.
///
/// # Example
///
/// ```
/// use cachelite::policy::fifo::FifoCache;
/// use cachelite::traits::CoreCache;
///
/// let mut cache = FifoCache::new(2);
/// cache.put("a".to_string(), 1);
/// cache.put("b".to_string(), 2);
/// cache.get(&"a".to_string()); // no effect on order
/// cache.put("c".to_string(), 3); // evicts "a"
///
/// assert!(!cache.contains(&"a".to_string()));
/// assert!(cache.contains(&"b".to_string()));
/// ```
pub struct FifoCache<K, V> {
    map: FxHashMap<K, Slot<V>>,
    order: VecDeque<(K, u64)>,
    next_seq: u64,
    capacity: usize,
    stats: HitStats,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let hint = prealloc_hint(capacity);
        Self {
            map: FxHashMap::with_capacity_and_hasher(hint, Default::default()),
            order: VecDeque::with_capacity(hint),
            next_seq: 0,
            capacity,
            stats: HitStats::new(),
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Queue length including stale entries left behind by `delete`.
    pub fn queue_len(&self) -> usize {
        self.order.len()
    }

    /// Live keys from oldest to newest.
    pub fn keys_oldest_first(&self) -> impl Iterator<Item = &K> + '_ {
        self.order
            .iter()
            .filter(|(key, seq)| self.is_live(key, *seq))
            .map(|(key, _)| key)
    }

    #[inline]
    fn is_live(&self, key: &K, seq: u64) -> bool {
        self.map.get(key).map(|slot| slot.seq) == Some(seq)
    }

    fn evict_overflow(&mut self) {
        #[cfg(feature = "metrics")]
        if self.map.len() > self.capacity {
            self.metrics.record_evict_call();
        }

        while self.map.len() > self.capacity {
            let Some((key, seq)) = self.order.pop_front() else {
                break;
            };
            if self.is_live(&key, seq) {
                self.map.remove(&key);
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
                trace!(
                    policy = "fifo",
                    len = self.map.len(),
                    capacity = self.capacity,
                    "evicted oldest entry"
                );
            } else {
                #[cfg(feature = "metrics")]
                self.metrics.record_stale_skip();
            }
        }
    }

    fn maybe_compact(&mut self) {
        if self.order.len() <= COMPACT_SLACK || self.order.len() <= self.map.len() * 2 {
            return;
        }
        let map = &self.map;
        self.order
            .retain(|(key, seq)| map.get(key).map(|slot| slot.seq) == Some(*seq));

        #[cfg(feature = "metrics")]
        self.metrics.record_queue_compaction();
        trace!(policy = "fifo", queue_len = self.order.len(), "compacted insertion queue");
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(slot) => {
                self.stats.record_hit();
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                Some(&slot.value)
            },
            None => {
                self.stats.record_miss();
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                None
            },
        }
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(slot) = self.map.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return Some(std::mem::replace(&mut slot.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.push_back((key.clone(), seq));
        self.map.insert(key, Slot { value, seq });
        self.evict_overflow();
        self.maybe_compact();
        None
    }

    fn delete(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_delete_call();

        if self.map.remove(key).is_none() {
            return false;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_delete_found();

        self.maybe_compact();
        true
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!(policy = "fifo", dropped = self.map.len(), "clearing cache");
        self.map.clear();
        self.order.clear();
        self.stats.reset();
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn stats(&self) -> HitStats {
        self.stats
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }

        let mut live = 0usize;
        let mut last_seq = None;
        for (key, seq) in &self.order {
            if *seq >= self.next_seq {
                return Err(InvariantError::new(format!(
                    "queue seq {} not yet issued (next {})",
                    seq, self.next_seq
                )));
            }
            if last_seq.is_some_and(|last| *seq <= last) {
                return Err(InvariantError::new(format!(
                    "queue seq {} out of insertion order",
                    seq
                )));
            }
            last_seq = Some(*seq);
            if self.is_live(key, *seq) {
                live += 1;
            }
        }

        if live != self.map.len() {
            return Err(InvariantError::new(format!(
                "queue holds {} live entries, map holds {}",
                live,
                self.map.len()
            )));
        }
        Ok(())
    }
}

impl<K, V> PeekCache<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|slot| &slot.value)
    }
}

impl<K, V> FifoCacheTrait<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.order.iter().find_map(|(key, seq)| {
            self.map
                .get_key_value(key)
                .filter(|(_, slot)| slot.seq == *seq)
                .map(|(key, slot)| (key, &slot.value))
        })
    }

    fn pop_oldest(&mut self) -> Option<(K, V)> {
        while let Some((key, seq)) = self.order.pop_front() {
            if self.is_live(&key, seq) {
                if let Some(slot) = self.map.remove(&key) {
                    return Some((key, slot.value));
                }
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_stale_skip();
        }
        None
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("queue_len", &self.order.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a FIFO cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(s: &str) -> String {
        s.to_string()
    }

    mod basic_behavior {
        use super::*;

        #[test]
        fn test_put_get_delete() {
            let mut cache = FifoCache::new(3);
            assert_eq!(cache.put(k("a"), 1), None);
            assert_eq!(cache.get(&k("a")), Some(&1));
            assert_eq!(cache.get(&k("b")), None);
            assert_eq!(cache.hit_rate(), 0.5);
            assert!(cache.delete(&k("a")));
            assert!(!cache.delete(&k("a")));
            assert!(cache.is_empty());
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_put_existing_replaces_in_place() {
            let mut cache = FifoCache::new(2);
            cache.put(k("a"), 1);
            cache.put(k("b"), 2);
            assert_eq!(cache.put(k("a"), 10), Some(1));
            assert_eq!(cache.queue_len(), 2);
            cache.put(k("c"), 3);
            // "a" keeps its original place and goes first
            assert!(!cache.contains(&k("a")));
            assert!(cache.contains(&k("b")));
        }

        #[test]
        fn test_clear_resets_everything() {
            let mut cache = FifoCache::new(2);
            cache.put(k("a"), 1);
            cache.get(&k("a"));
            cache.clear();
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.queue_len(), 0);
            assert_eq!(cache.hit_rate(), 0.0);
            assert_eq!(cache.get(&k("a")), None);
        }
    }

    mod eviction_order {
        use super::*;

        #[test]
        fn test_fifo_order_ignores_reads() {
            let mut cache = FifoCache::new(2);
            cache.put(k("A"), 1);
            cache.put(k("B"), 2);
            cache.get(&k("A"));
            cache.put(k("C"), 3);
            assert!(!cache.contains(&k("A")));
            assert!(cache.contains(&k("B")));
            assert!(cache.contains(&k("C")));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_keys_oldest_first_skips_deleted() {
            let mut cache = FifoCache::new(4);
            for i in 0..4 {
                cache.put(i, i);
            }
            cache.delete(&1);
            let keys: Vec<_> = cache.keys_oldest_first().copied().collect();
            assert_eq!(keys, vec![0, 2, 3]);
        }

        #[test]
        fn test_peek_and_pop_oldest_skip_stale() {
            let mut cache = FifoCache::new(3);
            cache.put(1, "a");
            cache.put(2, "b");
            cache.put(3, "c");
            cache.delete(&1);
            assert_eq!(cache.peek_oldest(), Some((&2, &"b")));
            assert_eq!(cache.pop_oldest(), Some((2, "b")));
            assert_eq!(cache.pop_oldest(), Some((3, "c")));
            assert_eq!(cache.pop_oldest(), None);
            assert_eq!(cache.queue_len(), 0);
        }
    }

    mod lazy_cleanup {
        use super::*;

        #[test]
        fn test_delete_leaves_stale_queue_entry() {
            let mut cache = FifoCache::new(3);
            cache.put(1, ());
            cache.put(2, ());
            cache.delete(&1);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.queue_len(), 2);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_stale_entry_does_not_count_as_eviction() {
            let mut cache = FifoCache::new(2);
            cache.put(1, ());
            cache.put(2, ());
            cache.delete(&1);
            cache.put(3, ());
            // len 2 <= 2, nothing evicted yet
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));

            cache.put(4, ());
            // stale 1 is skipped, live 2 is evicted
            assert!(!cache.contains(&2));
            assert!(cache.contains(&3));
            assert!(cache.contains(&4));
            assert_eq!(cache.len(), 2);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_delete_then_reput_gets_new_position() {
            let mut cache = FifoCache::new(2);
            cache.put(k("a"), 1);
            cache.put(k("b"), 2);
            cache.delete(&k("a"));
            cache.put(k("a"), 3);
            // old "a" slot is stale; "b" is now the oldest
            cache.put(k("c"), 4);
            assert!(cache.contains(&k("a")));
            assert!(!cache.contains(&k("b")));
            assert_eq!(cache.peek(&k("a")), Some(&3));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_compaction_bounds_queue() {
            let mut cache = FifoCache::new(4);
            for round in 0..1_000u32 {
                cache.put(round, round);
                cache.delete(&round);
            }
            assert!(cache.is_empty());
            assert!(cache.queue_len() <= COMPACT_SLACK + 1);
            cache.check_invariants().unwrap();
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn test_zero_capacity_holds_nothing() {
            let mut cache = FifoCache::new(0);
            cache.put(k("a"), 1);
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.get(&k("a")), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_capacity_one() {
            let mut cache = FifoCache::new(1);
            cache.put(1, 1);
            cache.put(2, 2);
            assert_eq!(cache.len(), 1);
            assert!(cache.contains(&2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_default_extend_debug() {
            let mut cache: FifoCache<u32, u32> = FifoCache::default();
            cache.extend((0..40).map(|i| (i, i)));
            assert_eq!(cache.len(), 16);
            let keys: Vec<_> = cache.keys_oldest_first().copied().collect();
            assert_eq!(keys, (24..40).collect::<Vec<_>>());
            assert!(format!("{:?}", cache).contains("FifoCache"));
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn test_snapshot_counts_stale_skips() {
            let mut cache = FifoCache::new(1);
            cache.put(1, ());
            cache.delete(&1);
            cache.put(2, ());
            cache.put(3, ());

            let snap = cache.snapshot();
            assert_eq!(snap.stale_skips, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.delete_found, 1);
            assert_eq!(snap.cache_len, 1);
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: capacity holds and queue/map agree after every operation.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_capacity_and_structure(
            capacity in 0usize..8,
            ops in prop::collection::vec((0u8..4, 0u8..16), 0..300)
        ) {
            let mut cache = FifoCache::new(capacity);
            for (op, key) in ops {
                match op {
                    0 | 1 => { cache.put(key, u32::from(key)); },
                    2 => { cache.get(&key); },
                    _ => { cache.delete(&key); },
                }
                prop_assert!(cache.len() <= cache.capacity());
                prop_assert!(cache.check_invariants().is_ok());
            }
        }

        /// Property: with no deletes, survivors are exactly the most recently
        /// inserted distinct keys.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_survivors_are_newest(keys in prop::collection::vec(0u16..1000, 0..100)) {
            let capacity = 5;
            let mut cache = FifoCache::new(capacity);
            let mut first_seen: Vec<u16> = Vec::new();
            for key in keys {
                if !cache.contains(&key) {
                    first_seen.push(key);
                }
                cache.put(key, ());
            }
            let survivors: Vec<u16> = cache.keys_oldest_first().copied().collect();
            let start = first_seen.len().saturating_sub(capacity);
            prop_assert_eq!(survivors, first_seen[start..].to_vec());
        }
    }
}
