pub use crate::builder::{
    new_cache, CacheBuilder, CacheConfig, CachePolicy, ConfiguredCache, PolicyCache,
};
#[cfg(feature = "concurrency")]
pub use crate::builder::new_thread_safe_cache;
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ThreadSafeCache;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{CacheMetricsSnapshot, MetricsExporter, MetricsSnapshotProvider};
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::stats::HitStats;
pub use crate::traits::{
    ConcurrentCache, CoreCache, FifoCacheTrait, LfuCacheTrait, LruCacheTrait, PeekCache,
};
