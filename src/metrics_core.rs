//! Core metrics traits.
//!
//! Provides the `MetricsRecorder` trait and `NoopMetrics` so that the rest
//! of the service can accept `Arc<dyn MetricsRecorder>` without caring
//! whether a live exporter exists. When metrics export is not wired up,
//! `NoopMetrics` is injected and every call is a no-op.

use std::sync::Arc;

use crate::metrics::QueryIndexType;

/// Trait for recording service health and workload metrics.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync) and must never fail
/// or block the caller.
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    // ===== Resources =====

    /// Refresh the CPU usage gauge from the resource provider
    fn set_cpu_usage(&self) {}

    /// Refresh the RAM usage gauge from the resource provider
    fn set_ram_usage(&self) {}

    /// Refresh the per-device GPU utilization gauges
    fn set_gpu_usage(&self) {}

    /// Refresh the per-device GPU memory gauges
    fn set_gpu_memory_usage(&self) {}

    // ===== Workload =====

    /// Record ingestion throughput (MB/s) for a batch of vectors
    fn record_ingestion_throughput(&self, item_count: u64, dimension: u64, elapsed_secs: f64) {}

    /// Record query throughput for a query type given by name
    fn record_query_throughput(&self, query_type: &str, value: f64) {}

    /// Record query throughput for a known index type
    fn record_index_throughput(&self, index_type: QueryIndexType, value: f64) {}

    // ===== Connections =====

    /// Increment the active connection count
    fn inc_connection_count(&self) {}

    /// Decrement the active connection count
    fn dec_connection_count(&self) {}
}

/// Noop metrics implementation for tests and hosts without an exporter.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
