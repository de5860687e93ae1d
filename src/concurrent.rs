//! Thread-safe decorator over any single-threaded cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────┐
//!   │ ThreadSafeCache<C>                            │
//!   │   capacity: usize          (immutable, no lock)│
//!   │   inner: parking_lot::RwLock<C>               │
//!   │                                               │
//!   │   write lock: get, get_with, put, delete,     │
//!   │               clear                           │
//!   │   read lock:  len, hit_rate, stats, contains, │
//!   │               peek_with, check_invariants,    │
//!   │               snapshot                        │
//!   └───────────────────────────────────────────────┘
//! ```
//!
//! `get` takes the write lock: every policy may reorder on a hit and the
//! hit/miss counters are updated. Each public call is one critical section,
//! so a `put` that overflows evicts inside the same section and callers never
//! observe `len() > capacity()`.
//!
//! `parking_lot::RwLock` does not poison; a panic inside a critical section
//! releases the lock on unwind.
//!
//! The wrapper also implements [`CoreCache`] through `RwLock::get_mut`, so an
//! exclusively borrowed `ThreadSafeCache` can be passed anywhere the plain
//! interface is expected without taking a lock. It does not implement
//! [`PeekCache`]: a borrowed value cannot outlive the read guard, so
//! side-effect-free reads go through [`ThreadSafeCache::peek_with`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use cachelite::concurrent::ThreadSafeCache;
//! use cachelite::policy::lru::LruCache;
//!
//! let cache = Arc::new(ThreadSafeCache::new(LruCache::new(64)));
//!
//! let handles: Vec<_> = (0..4u32)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100u32 {
//!                 cache.put(t * 1000 + i, i);
//!                 cache.get(&(t * 1000 + i));
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert!(cache.len() <= 64);
//! assert!(cache.check_invariants().is_ok());
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::MetricsSnapshotProvider;
use crate::stats::HitStats;
use crate::traits::{ConcurrentCache, CoreCache, PeekCache};

/// Cache wrapper serializing every operation through a `parking_lot::RwLock`.
pub struct ThreadSafeCache<C> {
    inner: RwLock<C>,
    capacity: usize,
}

impl<C> ThreadSafeCache<C> {
    /// Wraps `cache`. The capacity is copied once so `capacity()` needs no
    /// lock.
    pub fn new<K, V>(cache: C) -> Self
    where
        C: CoreCache<K, V>,
    {
        let capacity = cache.capacity();
        Self {
            inner: RwLock::new(cache),
            capacity,
        }
    }

    /// Unwraps the inner cache.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }

    /// Returns a clone of the value under `key`, updating policy state.
    pub fn get<K, V>(&self, key: &K) -> Option<V>
    where
        C: CoreCache<K, V>,
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Looks up `key` and applies `f` to the value while the lock is held.
    ///
    /// Counts as a `get` for policy state and hit/miss accounting; useful
    /// when `V` is expensive or impossible to clone.
    pub fn get_with<K, V, R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        C: CoreCache<K, V>,
    {
        self.inner.write().get(key).map(f)
    }

    pub fn put<K, V>(&self, key: K, value: V) -> Option<V>
    where
        C: CoreCache<K, V>,
    {
        self.inner.write().put(key, value)
    }

    pub fn delete<K, V>(&self, key: &K) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.write().delete(key)
    }

    pub fn clear<K, V>(&self)
    where
        C: CoreCache<K, V>,
    {
        self.inner.write().clear();
    }

    pub fn len<K, V>(&self) -> usize
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().len()
    }

    pub fn is_empty<K, V>(&self) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().is_empty()
    }

    /// Configured capacity. Lock-free.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hit_rate<K, V>(&self) -> f64
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().hit_rate()
    }

    pub fn stats<K, V>(&self) -> HitStats
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().stats()
    }

    /// Membership test without touching policy state or counters.
    pub fn contains<K, V>(&self, key: &K) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().contains(key)
    }

    /// Applies `f` to the value under `key` while holding the read lock.
    ///
    /// Leaves eviction order and counters untouched, like
    /// [`PeekCache::peek`] on an unwrapped cache.
    pub fn peek_with<K, V, R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        C: PeekCache<K, V>,
    {
        self.inner.read().peek(key).map(f)
    }

    pub fn check_invariants<K, V>(&self) -> Result<(), InvariantError>
    where
        C: CoreCache<K, V>,
    {
        self.inner.read().check_invariants()
    }

    /// Runs `f` with exclusive access to the inner cache, for compound
    /// operations that must be atomic.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<K, V, C> CoreCache<K, V> for ThreadSafeCache<C>
where
    C: CoreCache<K, V>,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        self.inner.get_mut().get(key)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.inner.get_mut().put(key, value)
    }

    fn delete(&mut self, key: &K) -> bool {
        self.inner.get_mut().delete(key)
    }

    fn clear(&mut self) {
        self.inner.get_mut().clear();
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn stats(&self) -> HitStats {
        self.inner.read().stats()
    }

    fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

impl<C> ConcurrentCache for ThreadSafeCache<C> where C: Send + Sync {}

#[cfg(feature = "metrics")]
impl<C, S> MetricsSnapshotProvider<S> for ThreadSafeCache<C>
where
    C: MetricsSnapshotProvider<S>,
{
    fn snapshot(&self) -> S {
        self.inner.read().snapshot()
    }
}

impl<C: fmt::Debug> fmt::Debug for ThreadSafeCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_read() {
            Some(inner) => f
                .debug_struct("ThreadSafeCache")
                .field("capacity", &self.capacity)
                .field("inner", &*inner)
                .finish(),
            None => f
                .debug_struct("ThreadSafeCache")
                .field("capacity", &self.capacity)
                .finish_non_exhaustive(),
        }
    }
}
