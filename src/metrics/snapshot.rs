/// Point-in-time copy of a cache's counters plus size gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CacheMetricsSnapshot {
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

    // LFU only
    pub promotions: u64,
    pub promotion_steps: u64,

    // FIFO only
    pub stale_skips: u64, // queue entries popped that were already deleted
    pub queue_compactions: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Hit ratio over all recorded `get` calls.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_hit_rate_is_zero() {
        assert_eq!(CacheMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_from_counters() {
        let snapshot = CacheMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.hit_rate(), 0.75);
    }
}
