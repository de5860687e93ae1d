//! # Least Recently Used (LRU) Cache
//!
//! Keeps every live entry in one recency list. The front of the list is the
//! most recently used entry; eviction always takes the back.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   FxHashMap<K, SlotId>            IntrusiveList<Entry<K, V>>         │
//!   │   ┌────────┬────────┐                                                │
//!   │   │ "a"    │ id_2 ──┼──┐    front ──► [c] ◄──► [a] ◄──► [b] ◄── back │
//!   │   │ "b"    │ id_0 ──┼──┼──┐          (MRU)              (LRU)        │
//!   │   │ "c"    │ id_1 ──┼─┐│  │                                          │
//!   │   └────────┴────────┘ ││  └──────────────────────────────┘           │
//!   │                       │└─────────────────────┘                       │
//!   │                       └─────────┘                                    │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each node stores its own key, so eviction (which finds the victim by list
//! position) can remove the index entry without a separate reverse map.
//!
//! ## Operations
//!
//! | Method          | Effect                                              |
//! |-----------------|-----------------------------------------------------|
//! | `get`           | hit: move to front, count hit; miss: count miss     |
//! | `put` (new)     | push front, then evict from back while over capacity|
//! | `put` (exists)  | replace value, move to front                        |
//! | `delete`        | unlink from anywhere, drop index entry              |
//! | `clear`         | drop everything, reset hit/miss                     |
//!
//! All of the above are O(1). `recency_rank` is O(n).
//!
//! ## Capacity 0 and 1
//!
//! With capacity 0 every `put` inserts and then immediately evicts the new
//! entry, so the cache stays empty. With capacity 1 every new key evicts the
//! previous one and the single node is both front and back.
//!
//! ## Thread Safety
//!
//! `LruCache` is **NOT thread-safe**. Wrap it in
//! [`ThreadSafeCache`](crate::concurrent::ThreadSafeCache) to share it.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::prealloc_hint;
use crate::stats::HitStats;
use crate::traits::{CoreCache, LruCacheTrait, PeekCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// LRU cache over an arena-backed recency list.
///
/// # Example
///
/// ```
/// use cachelite::policy::lru::LruCache;
/// use cachelite::traits::CoreCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put("a".to_string(), 1);
/// cache.put("b".to_string(), 2);
/// cache.get(&"a".to_string());
/// cache.put("c".to_string(), 3); // evicts "b"
///
/// assert!(cache.contains(&"a".to_string()));
/// assert!(!cache.contains(&"b".to_string()));
/// ```
pub struct LruCache<K, V> {
    list: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    stats: HitStats,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let hint = prealloc_hint(capacity);
        Self {
            list: IntrusiveList::with_capacity(hint),
            index: FxHashMap::with_capacity_and_hasher(hint, Default::default()),
            capacity,
            stats: HitStats::new(),
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Keys from most to least recently used.
    pub fn keys_mru(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|entry| &entry.key)
    }

    fn evict_overflow(&mut self) {
        #[cfg(feature = "metrics")]
        if self.list.len() > self.capacity {
            self.metrics.record_evict_call();
        }

        while self.list.len() > self.capacity {
            let Some(entry) = self.list.pop_back() else {
                break;
            };
            self.index.remove(&entry.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            trace!(
                policy = "lru",
                len = self.list.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                self.stats.record_miss();
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        self.stats.record_hit();
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.list.move_to_front(id);
            return self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.evict_overflow();
        None
    }

    fn delete(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_delete_call();

        let Some(id) = self.index.remove(key) else {
            return false;
        };
        let removed = self.list.remove(id).is_some();

        #[cfg(feature = "metrics")]
        if removed {
            self.metrics.record_delete_found();
        }
        removed
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!(policy = "lru", dropped = self.list.len(), "clearing cache");
        self.list.clear();
        self.index.clear();
        self.stats.reset();
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
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
        self.index.contains_key(key)
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, list holds {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.list.iter_entries() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list node {:?} is not indexed under its key",
                    id
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> PeekCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|entry| &entry.key == key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
