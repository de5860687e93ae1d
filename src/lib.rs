//! cachelite: bounded in-memory key/value caches with pluggable eviction.
//!
//! Three policies share one interface, [`traits::CoreCache`]:
//!
//! - [`policy::lru::LruCache`]: evicts the least recently used entry.
//! - [`policy::lfu::LfuCache`]: evicts the least frequently used entry.
//! - [`policy::fifo::FifoCache`]: evicts in insertion order.
//!
//! Each cache is single-threaded (`&mut self`); wrap one in
//! [`concurrent::ThreadSafeCache`] to share it across threads. The
//! [`builder`] module selects a policy at runtime.
//!
//! ```
//! use cachelite::prelude::*;
//!
//! let mut cache = new_cache::<String, u32>(CachePolicy::Lru, 2);
//! cache.put("A".to_string(), 1);
//! cache.put("B".to_string(), 2);
//! cache.get(&"A".to_string());
//! cache.put("C".to_string(), 3);
//! assert!(!cache.contains(&"B".to_string()));
//! ```
//!
//! ## Features
//!
//! - `concurrency` (default): [`concurrent::ThreadSafeCache`] over `parking_lot`.
//! - `metrics`: per-operation counters, snapshots and a Prometheus text exporter.
//! - `serde`: `Serialize`/`Deserialize` for [`builder::CachePolicy`] and
//!   [`builder::CacheConfig`].

pub mod builder;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod stats;
pub mod traits;
