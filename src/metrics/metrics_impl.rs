use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, FifoMetricsRecorder, LfuMetricsRecorder};

/// Counters shared by every policy; policy-specific fields stay zero for
/// policies that never record them.
///
/// Unlike the hit/miss counters behind `hit_rate`, these are cumulative and
/// survive `clear` (which is itself counted).
#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub delete_calls: u64,
    pub delete_found: u64,
    pub clear_calls: u64,
    pub promotions: u64,
    pub promotion_steps: u64,
    pub stale_skips: u64,
    pub queue_compactions: u64,
}

impl CacheMetrics {
    /// Builds a snapshot, filling the gauges from the owning cache.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            delete_calls: self.delete_calls,
            delete_found: self.delete_found,
            clear_calls: self.clear_calls,
            promotions: self.promotions,
            promotion_steps: self.promotion_steps,
            stale_skips: self.stale_skips,
            queue_compactions: self.queue_compactions,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    #[inline]
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    #[inline]
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    #[inline]
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    #[inline]
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    #[inline]
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    fn record_delete_call(&mut self) {
        self.delete_calls += 1;
    }

    #[inline]
    fn record_delete_found(&mut self) {
        self.delete_found += 1;
    }

    #[inline]
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LfuMetricsRecorder for CacheMetrics {
    #[inline]
    fn record_promotion(&mut self, steps: u64) {
        self.promotions += 1;
        self.promotion_steps += steps;
    }
}

impl FifoMetricsRecorder for CacheMetrics {
    #[inline]
    fn record_stale_skip(&mut self) {
        self.stale_skips += 1;
    }

    #[inline]
    fn record_queue_compaction(&mut self) {
        self.queue_compactions += 1;
    }
}
