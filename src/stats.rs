//! Per-instance hit/miss accounting.
//!
//! Every cache owns one [`HitStats`]. Counters only move on `get`, and reset on
//! `clear`, so `hits + misses` is always the number of lookups since the cache
//! was built or last cleared.

/// Hit and miss counters for `get` calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HitStats {
    pub hits: u64,
    pub misses: u64,
}

impl HitStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Total number of lookups recorded.
    #[inline]
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stats_report_zero_rate() {
        let stats = HitStats::new();
        assert_eq!(stats.lookups(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn one_hit_one_miss_is_half() {
        let mut stats = HitStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn all_hits_is_one() {
        let mut stats = HitStats::new();
        for _ in 0..3 {
            stats.record_hit();
        }
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn reset_clears_counters() {
        let mut stats = HitStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.reset();
        assert_eq!(stats, HitStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
