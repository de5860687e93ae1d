//! Eviction policies.
//!
//! | Policy | Evicts | Reorders on `get` |
//! |--------|--------|-------------------|
//! | [`lru::LruCache`] | least recently used | yes |
//! | [`lfu::LfuCache`] | least frequently used | yes, local promotion |
//! | [`fifo::FifoCache`] | oldest insertion | no |

pub mod fifo;
pub mod lfu;
pub mod lru;

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOC: usize = 1 << 12;

#[inline]
pub(crate) fn prealloc_hint(capacity: usize) -> usize {
    capacity.min(MAX_PREALLOC)
}
