//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and exporting are split into small traits so
//! policy code only ever writes counters.
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get hit/miss, insert,      │
//!                 │  evict, delete, clear       │
//!                 └──────────────┬──────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌──────────────┐               ┌──────────────┐
//!         │  Lfu         │               │  Fifo        │
//!         │  Recorder    │               │  Recorder    │
//!         └──────────────┘               └──────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_delete_call(&mut self);
    fn record_delete_found(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LFU behavior (frequency order).
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    /// Records one promotion that moved a node `steps` positions toward the front.
    fn record_promotion(&mut self, steps: u64);
}

/// Metrics for FIFO behavior (insertion order).
pub trait FifoMetricsRecorder: CoreMetricsRecorder {
    fn record_stale_skip(&mut self);
    fn record_queue_compaction(&mut self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring system.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
