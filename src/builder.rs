//! Policy selection and cache construction.
//!
//! [`PolicyCache`] wraps the three concrete caches behind one type so the
//! policy can be picked at runtime (from a config file, a CLI flag, a tag in
//! a request) while callers keep a single concrete type.
//!
//! ## Example
//!
//! ```rust
//! use cachelite::builder::{new_cache, CacheBuilder, CachePolicy};
//! use cachelite::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .policy(CachePolicy::Lfu)
//!     .build::<String, u64>();
//! cache.put("hello".to_string(), 1);
//! assert_eq!(cache.get(&"hello".to_string()), Some(&1));
//!
//! // Lenient constructor: unknown tags fall back to LRU, negative capacity to 0.
//! let cache = new_cache::<String, u64>(CachePolicy::from_tag("ARC"), -5);
//! assert_eq!(cache.policy(), CachePolicy::Lru);
//! assert_eq!(cache.capacity(), 0);
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use tracing::debug;

#[cfg(feature = "concurrency")]
use crate::concurrent::ThreadSafeCache;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetricsSnapshot, MetricsSnapshotProvider};
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::stats::HitStats;
use crate::traits::{CoreCache, PeekCache};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CachePolicy {
    /// Least Recently Used.
    #[default]
    Lru,
    /// Least Frequently Used, ties broken by recency of promotion.
    Lfu,
    /// First In, First Out.
    Fifo,
}

impl CachePolicy {
    /// Every policy, in declaration order.
    pub const ALL: [CachePolicy; 3] = [CachePolicy::Lru, CachePolicy::Lfu, CachePolicy::Fifo];

    /// Lenient lookup: case-insensitive, unknown tags map to [`CachePolicy::Lru`].
    ///
    /// ```
    /// use cachelite::builder::CachePolicy;
    ///
    /// assert_eq!(CachePolicy::from_tag("FIFO"), CachePolicy::Fifo);
    /// assert_eq!(CachePolicy::from_tag("clock"), CachePolicy::Lru);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }

    /// Lowercase tag, the same string [`FromStr`] accepts.
    pub const fn as_str(self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Fifo => "fifo",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ConfigError::new(format!("unknown cache policy `{}`", s)))
    }
}

/// Cache construction parameters, loadable from external configuration with
/// the `serde` feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    pub capacity: usize,
    pub policy: CachePolicy,
    pub thread_safe: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            policy: CachePolicy::Lru,
            thread_safe: false,
        }
    }
}

impl CacheConfig {
    /// Rejects capacities no allocation could ever honor, and `thread_safe`
    /// when the `concurrency` feature is off.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity > isize::MAX as usize {
            return Err(ConfigError::new(format!(
                "capacity {} exceeds isize::MAX",
                self.capacity
            )));
        }
        if self.thread_safe && !cfg!(feature = "concurrency") {
            return Err(ConfigError::new(
                "thread_safe cache requested but the `concurrency` feature is disabled",
            ));
        }
        Ok(())
    }

    /// Validates and builds the cache this configuration describes,
    /// lock-wrapped when `thread_safe` is set.
    ///
    /// ```
    /// use cachelite::builder::{CacheConfig, CachePolicy};
    ///
    /// let config = CacheConfig {
    ///     capacity: 16,
    ///     policy: CachePolicy::Lfu,
    ///     thread_safe: true,
    /// };
    /// let cache = config.build::<String, u32>().unwrap();
    /// assert!(cache.is_thread_safe());
    /// assert_eq!(cache.policy(), CachePolicy::Lfu);
    /// ```
    pub fn build<K, V>(&self) -> Result<ConfiguredCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let builder = CacheBuilder::from_config(self)?;

        #[cfg(feature = "concurrency")]
        if self.thread_safe {
            return Ok(ConfiguredCache::Shared(builder.build_thread_safe()));
        }

        Ok(ConfiguredCache::Local(builder.build()))
    }
}

/// A cache whose policy is chosen at runtime.
pub enum PolicyCache<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Fifo(FifoCache<K, V>),
}

impl<K, V> PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(policy: CachePolicy, capacity: usize) -> Self {
        match policy {
            CachePolicy::Lru => PolicyCache::Lru(LruCache::new(capacity)),
            CachePolicy::Lfu => PolicyCache::Lfu(LfuCache::new(capacity)),
            CachePolicy::Fifo => PolicyCache::Fifo(FifoCache::new(capacity)),
        }
    }

    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match self {
            PolicyCache::Lru(_) => CachePolicy::Lru,
            PolicyCache::Lfu(_) => CachePolicy::Lfu,
            PolicyCache::Fifo(_) => CachePolicy::Fifo,
        }
    }
}

impl<K, V> CoreCache<K, V> for PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        match self {
            PolicyCache::Lru(lru) => lru.get(key),
            PolicyCache::Lfu(lfu) => lfu.get(key),
            PolicyCache::Fifo(fifo) => fifo.get(key),
        }
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        match self {
            PolicyCache::Lru(lru) => lru.put(key, value),
            PolicyCache::Lfu(lfu) => lfu.put(key, value),
            PolicyCache::Fifo(fifo) => fifo.put(key, value),
        }
    }

    fn delete(&mut self, key: &K) -> bool {
        match self {
            PolicyCache::Lru(lru) => lru.delete(key),
            PolicyCache::Lfu(lfu) => lfu.delete(key),
            PolicyCache::Fifo(fifo) => fifo.delete(key),
        }
    }

    fn clear(&mut self) {
        match self {
            PolicyCache::Lru(lru) => lru.clear(),
            PolicyCache::Lfu(lfu) => lfu.clear(),
            PolicyCache::Fifo(fifo) => fifo.clear(),
        }
    }

    fn len(&self) -> usize {
        match self {
            PolicyCache::Lru(lru) => lru.len(),
            PolicyCache::Lfu(lfu) => lfu.len(),
            PolicyCache::Fifo(fifo) => fifo.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            PolicyCache::Lru(lru) => lru.capacity(),
            PolicyCache::Lfu(lfu) => lfu.capacity(),
            PolicyCache::Fifo(fifo) => fifo.capacity(),
        }
    }

    fn stats(&self) -> HitStats {
        match self {
            PolicyCache::Lru(lru) => lru.stats(),
            PolicyCache::Lfu(lfu) => lfu.stats(),
            PolicyCache::Fifo(fifo) => fifo.stats(),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match self {
            PolicyCache::Lru(lru) => lru.contains(key),
            PolicyCache::Lfu(lfu) => lfu.contains(key),
            PolicyCache::Fifo(fifo) => fifo.contains(key),
        }
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        match self {
            PolicyCache::Lru(lru) => lru.check_invariants(),
            PolicyCache::Lfu(lfu) => lfu.check_invariants(),
            PolicyCache::Fifo(fifo) => fifo.check_invariants(),
        }
    }
}

impl<K, V> PeekCache<K, V> for PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek(&self, key: &K) -> Option<&V> {
        match self {
            PolicyCache::Lru(lru) => lru.peek(key),
            PolicyCache::Lfu(lfu) => lfu.peek(key),
            PolicyCache::Fifo(fifo) => fifo.peek(key),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        match self {
            PolicyCache::Lru(lru) => lru.snapshot(),
            PolicyCache::Lfu(lfu) => lfu.snapshot(),
            PolicyCache::Fifo(fifo) => fifo.snapshot(),
        }
    }
}

impl<K, V> fmt::Debug for PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyCache::Lru(lru) => fmt::Debug::fmt(lru, f),
            PolicyCache::Lfu(lfu) => fmt::Debug::fmt(lfu, f),
            PolicyCache::Fifo(fifo) => fmt::Debug::fmt(fifo, f),
        }
    }
}

/// Builder for [`PolicyCache`] and its thread-safe variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
    policy: CachePolicy,
}

impl CacheBuilder {
    /// Starts a builder with the given capacity and the default policy (LRU).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: CachePolicy::default(),
        }
    }

    /// Starts a builder from a loaded configuration. Only capacity and
    /// policy are taken; [`CacheConfig::build`] also honors `thread_safe`.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            capacity: config.capacity,
            policy: config.policy,
        })
    }

    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build<K, V>(self) -> PolicyCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        debug!(policy = %self.policy, capacity = self.capacity, "building cache");
        PolicyCache::new(self.policy, self.capacity)
    }

    /// Builds the cache wrapped in a [`ThreadSafeCache`].
    ///
    /// ```
    /// use std::sync::Arc;
    /// use cachelite::builder::{CacheBuilder, CachePolicy};
    ///
    /// let cache = Arc::new(
    ///     CacheBuilder::new(8)
    ///         .policy(CachePolicy::Fifo)
    ///         .build_thread_safe::<u32, String>(),
    /// );
    /// cache.put(1, "one".to_string());
    /// assert_eq!(cache.get(&1).as_deref(), Some("one"));
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn build_thread_safe<K, V>(self) -> ThreadSafeCache<PolicyCache<K, V>>
    where
        K: Eq + Hash + Clone,
    {
        ThreadSafeCache::new(self.build())
    }
}

/// Cache built by [`CacheConfig::build`]: plain, or shared behind a lock.
pub enum ConfiguredCache<K, V> {
    Local(PolicyCache<K, V>),
    #[cfg(feature = "concurrency")]
    Shared(ThreadSafeCache<PolicyCache<K, V>>),
}

impl<K, V> ConfiguredCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn is_thread_safe(&self) -> bool {
        match self {
            ConfiguredCache::Local(_) => false,
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(_) => true,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        match self {
            ConfiguredCache::Local(local) => local.policy(),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => shared.with_inner(|inner| inner.policy()),
        }
    }

    /// The unwrapped cache, if `thread_safe` was off.
    pub fn into_local(self) -> Option<PolicyCache<K, V>> {
        match self {
            ConfiguredCache::Local(local) => Some(local),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(_) => None,
        }
    }

    /// The lock-wrapped cache, if `thread_safe` was on.
    #[cfg(feature = "concurrency")]
    pub fn into_shared(self) -> Option<ThreadSafeCache<PolicyCache<K, V>>> {
        match self {
            ConfiguredCache::Local(_) => None,
            ConfiguredCache::Shared(shared) => Some(shared),
        }
    }
}

impl<K, V> CoreCache<K, V> for ConfiguredCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        match self {
            ConfiguredCache::Local(local) => local.get(key),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::get(shared, key),
        }
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        match self {
            ConfiguredCache::Local(local) => local.put(key, value),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::put(shared, key, value),
        }
    }

    fn delete(&mut self, key: &K) -> bool {
        match self {
            ConfiguredCache::Local(local) => local.delete(key),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::delete(shared, key),
        }
    }

    fn clear(&mut self) {
        match self {
            ConfiguredCache::Local(local) => local.clear(),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::clear(shared),
        }
    }

    fn len(&self) -> usize {
        match self {
            ConfiguredCache::Local(local) => local.len(),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::len(shared),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            ConfiguredCache::Local(local) => local.capacity(),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => shared.capacity(),
        }
    }

    fn stats(&self) -> HitStats {
        match self {
            ConfiguredCache::Local(local) => local.stats(),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::stats(shared),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match self {
            ConfiguredCache::Local(local) => local.contains(key),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::contains(shared, key),
        }
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        match self {
            ConfiguredCache::Local(local) => local.check_invariants(),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => CoreCache::check_invariants(shared),
        }
    }
}

impl<K, V> fmt::Debug for ConfiguredCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfiguredCache::Local(local) => f.debug_tuple("Local").field(local).finish(),
            #[cfg(feature = "concurrency")]
            ConfiguredCache::Shared(shared) => f.debug_tuple("Shared").field(shared).finish(),
        }
    }
}

/// Clamps a signed capacity to `usize`, mapping negatives to 0.
fn normalize_capacity(capacity: i64) -> usize {
    usize::try_from(capacity.max(0)).unwrap_or(usize::MAX)
}

/// Builds a cache for `policy`; negative capacities become 0.
pub fn new_cache<K, V>(policy: CachePolicy, capacity: i64) -> PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    CacheBuilder::new(normalize_capacity(capacity))
        .policy(policy)
        .build()
}

/// Thread-safe counterpart of [`new_cache`].
#[cfg(feature = "concurrency")]
pub fn new_thread_safe_cache<K, V>(
    policy: CachePolicy,
    capacity: i64,
) -> ThreadSafeCache<PolicyCache<K, V>>
where
    K: Eq + Hash + Clone,
{
    CacheBuilder::new(normalize_capacity(capacity))
        .policy(policy)
        .build_thread_safe()
}
