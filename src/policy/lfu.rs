//! # LFU (Least Frequently Used) Cache
//!
//! All live entries sit in one list ordered by access frequency: the front
//! (top) holds the highest count, the back (bottom) the lowest. Eviction takes
//! the back.
//!
//! ## Architecture
//!
//! ```text
//!   FxHashMap<K, SlotId>
//!         │
//!         ▼
//!   front ──► [a:5] ◄──► [d:3] ◄──► [b:1] ◄──► [c:1] ◄── back
//!   (top)                             ▲           ▲      (bottom)
//!                                     │           └── next victim
//!                                     └── promoted/inserted more recently
//! ```
//!
//! ## Local Promotion
//!
//! A `get` bumps the node's count and then walks toward the front past every
//! neighbor whose count is `<=` the new count, splicing the node in front of
//! the last one passed. This is the swap-bubble expressed as one walk plus one
//! O(1) splice; the cost is the distance moved, not a global re-sort.
//!
//! ```text
//!   get(c):  [a:5] [d:3] [b:1] [c:1]
//!            c → 2, passes b:1 (stops at d:3)
//!            [a:5] [d:3] [c:2] [b:1]
//! ```
//!
//! Tie-break: because promotion passes equal counts, among entries with the
//! same count the one inserted or promoted least recently sits nearest the
//! back and is evicted first.
//!
//! ## Insertion
//!
//! ```text
//!   put(new_key, value)
//!        │
//!        ├── key exists?  → replace value only (count and position unchanged)
//!        │
//!        ├── capacity 0?  → nothing stored
//!        │
//!        ├── while len >= capacity: evict back
//!        │
//!        └── push back with count 1, then promote
//! ```
//!
//! Unlike LRU and FIFO, eviction here happens *before* the new node is linked,
//! so the list never grows past `capacity` even transiently.
//!
//! ## Thread Safety
//!
//! `LfuCache` is **NOT thread-safe**. Wrap it in
//! [`ThreadSafeCache`](crate::concurrent::ThreadSafeCache) to share it.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, LfuMetricsRecorder,
    MetricsSnapshotProvider,
};
use crate::policy::prealloc_hint;
use crate::stats::HitStats;
use crate::traits::{CoreCache, LfuCacheTrait, PeekCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    freq: u64,
}

/// LFU cache over an arena-backed frequency-ordered list.
///
/// # Example
///
/// ```
/// use cachelite::policy::lfu::LfuCache;
/// use cachelite::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache = LfuCache::new(2);
/// cache.put("a".to_string(), 1);
/// cache.put("b".to_string(), 2);
/// cache.get(&"a".to_string());
/// cache.get(&"a".to_string());
/// assert_eq!(cache.frequency(&"a".to_string()), Some(3));
///
/// cache.put("c".to_string(), 3); // evicts "b" (count 1)
/// assert!(!cache.contains(&"b".to_string()));
/// assert!(cache.contains(&"a".to_string()));
/// ```
pub struct LfuCache<K, V> {
    list: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    stats: HitStats,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LfuCache<K, V>
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

    /// Keys from most to least frequently used.
    pub fn keys_by_frequency(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.list.iter().map(|entry| (&entry.key, entry.freq))
    }

    /// Moves `id` toward the front past every neighbor with a count `<=` its
    /// own. Returns the number of positions moved.
    fn promote(&mut self, id: SlotId) -> u64 {
        let Some(freq) = self.list.get(id).map(|entry| entry.freq) else {
            return 0;
        };

        let mut anchor = None;
        let mut steps = 0u64;
        let mut cursor = self.list.prev_id(id);
        while let Some(prev) = cursor {
            match self.list.get(prev) {
                Some(entry) if entry.freq <= freq => {
                    anchor = Some(prev);
                    steps += 1;
                    cursor = self.list.prev_id(prev);
                },
                _ => break,
            }
        }

        if let Some(anchor) = anchor {
            self.list.move_before(id, anchor);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_promotion(steps);

        steps
    }

    fn evict_for_insert(&mut self) {
        #[cfg(feature = "metrics")]
        if self.list.len() >= self.capacity {
            self.metrics.record_evict_call();
        }

        while self.list.len() >= self.capacity {
            let Some(entry) = self.list.pop_back() else {
                break;
            };
            self.index.remove(&entry.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            trace!(
                policy = "lfu",
                freq = entry.freq,
                len = self.list.len(),
                capacity = self.capacity,
                "evicted least frequently used entry"
            );
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
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

        if let Some(entry) = self.list.get_mut(id) {
            entry.freq = entry.freq.saturating_add(1);
        }
        self.promote(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        self.evict_for_insert();

        let id = self.list.push_back(Entry {
            key: key.clone(),
            value,
            freq: 1,
        });
        self.index.insert(key, id);
        self.promote(id);
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

        debug!(policy = "lfu", dropped = self.list.len(), "clearing cache");
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

        let mut last_freq = u64::MAX;
        for (id, entry) in self.list.iter_entries() {
            if entry.freq == 0 {
                return Err(InvariantError::new(format!("node {:?} has count 0", id)));
            }
            if entry.freq > last_freq {
                return Err(InvariantError::new(format!(
                    "node {:?} count {} follows lower count {}",
                    id, entry.freq, last_freq
                )));
            }
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list node {:?} is not indexed under its key",
                    id
                )));
            }
            last_freq = entry.freq;
        }
        Ok(())
    }
}

impl<K, V> PeekCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    fn pop_lfu(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        let &id = self.index.get(key)?;
        self.list.get(id).map(|entry| entry.freq)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
