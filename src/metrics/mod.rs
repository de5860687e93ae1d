//! Optional operation counters (feature `metrics`).
//!
//! Separate from the always-on hit/miss counters in [`crate::stats`]: these
//! track every operation kind for benchmarking and monitoring, and can be
//! exported in Prometheus text format.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::CacheMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{
    CoreMetricsRecorder, FifoMetricsRecorder, LfuMetricsRecorder, MetricsExporter,
    MetricsSnapshotProvider,
};
