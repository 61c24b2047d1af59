//! Sampling facade
//!
//! The only entry point the rest of the service uses to report
//! measurements. Every update checks the global toggle first; when metrics
//! are disabled the call returns without touching any instrument.

use std::sync::Arc;

use tracing::{debug, warn};

use super::registry::{DeviceGauges, MAX_DEVICE_SLOTS};
use super::{MetricRegistry, QueryIndexType, ResourceSnapshotProvider};
use crate::metrics_core::MetricsRecorder;

/// Bytes per megabyte
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Size of one vector component (f32) in bytes
pub const VECTOR_COMPONENT_BYTES: u64 = 4;

pub struct SamplingFacade {
    enabled: bool,
    registry: Arc<MetricRegistry>,
    provider: Arc<dyn ResourceSnapshotProvider>,
}

impl SamplingFacade {
    pub fn new(
        enabled: bool,
        registry: Arc<MetricRegistry>,
        provider: Arc<dyn ResourceSnapshotProvider>,
    ) -> Self {
        Self {
            enabled,
            registry,
            provider,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    pub fn set_cpu_usage(&self) {
        if !self.enabled {
            return;
        }
        self.registry
            .cpu_usage_percent
            .set(self.provider.cpu_percent());
    }

    pub fn set_ram_usage(&self) {
        if !self.enabled {
            return;
        }
        self.registry
            .ram_usage_percent
            .set(self.provider.memory_percent());
    }

    pub fn set_gpu_usage(&self) {
        if !self.enabled {
            return;
        }
        let device_count = self.provider.device_count();
        let values = self.provider.gpu_percent();
        write_device_slots(
            &self.registry.gpu_usage_percent,
            device_count,
            values.iter().map(|&percent| percent as f64),
        );
    }

    pub fn set_gpu_memory_usage(&self) {
        if !self.enabled {
            return;
        }
        let device_count = self.provider.device_count();
        let values = self.provider.gpu_memory_used_bytes();
        write_device_slots(
            &self.registry.gpu_memory_usage_mb,
            device_count,
            values.iter().map(|&bytes| bytes_to_megabytes(bytes) as f64),
        );
    }

    /// CPU, RAM, GPU utilization and GPU memory in one pass
    pub fn sample_resources(&self) {
        self.set_cpu_usage();
        self.set_ram_usage();
        self.set_gpu_usage();
        self.set_gpu_memory_usage();
    }

    /// Set the ingestion gauge to the MB/s rate of `item_count` vectors of
    /// `dimension` f32 components written in `elapsed_secs`.
    ///
    /// A non-positive or non-finite `elapsed_secs` is rejected: the gauge
    /// keeps its previous value.
    pub fn record_ingestion_throughput(&self, item_count: u64, dimension: u64, elapsed_secs: f64) {
        if !self.enabled {
            return;
        }
        match ingestion_megabytes_per_second(item_count, dimension, elapsed_secs) {
            Some(rate) => self.registry.ingestion_throughput_mb_per_second.set(rate),
            None => warn!(
                "Ignoring ingestion throughput sample with elapsed time {}s",
                elapsed_secs
            ),
        }
    }

    /// Unknown query types are ignored.
    pub fn record_query_throughput(&self, query_type: &str, value: f64) {
        if !self.enabled {
            return;
        }
        match QueryIndexType::from_label(query_type) {
            Some(index_type) => self.registry.query_gauge(index_type).set(value),
            None => debug!("Ignoring throughput for unknown query type: {}", query_type),
        }
    }

    pub fn record_index_throughput(&self, index_type: QueryIndexType, value: f64) {
        if !self.enabled {
            return;
        }
        self.registry.query_gauge(index_type).set(value);
    }

    pub fn inc_connection_count(&self) {
        if !self.enabled {
            return;
        }
        self.registry.connection_count.inc();
    }

    pub fn dec_connection_count(&self) {
        if !self.enabled {
            return;
        }
        self.registry.connection_count.dec();
    }
}

impl MetricsRecorder for SamplingFacade {
    fn set_cpu_usage(&self) {
        SamplingFacade::set_cpu_usage(self);
    }

    fn set_ram_usage(&self) {
        SamplingFacade::set_ram_usage(self);
    }

    fn set_gpu_usage(&self) {
        SamplingFacade::set_gpu_usage(self);
    }

    fn set_gpu_memory_usage(&self) {
        SamplingFacade::set_gpu_memory_usage(self);
    }

    fn record_ingestion_throughput(&self, item_count: u64, dimension: u64, elapsed_secs: f64) {
        SamplingFacade::record_ingestion_throughput(self, item_count, dimension, elapsed_secs);
    }

    fn record_query_throughput(&self, query_type: &str, value: f64) {
        SamplingFacade::record_query_throughput(self, query_type, value);
    }

    fn record_index_throughput(&self, index_type: QueryIndexType, value: f64) {
        SamplingFacade::record_index_throughput(self, index_type, value);
    }

    fn inc_connection_count(&self) {
        SamplingFacade::inc_connection_count(self);
    }

    fn dec_connection_count(&self) {
        SamplingFacade::dec_connection_count(self);
    }
}

/// Write the first `min(device_count, values.len(), slots)` slots.
///
/// Slots past the bound keep whatever they held before.
fn write_device_slots(
    gauges: &DeviceGauges,
    device_count: usize,
    values: impl ExactSizeIterator<Item = f64>,
) {
    let bound = device_count.min(values.len()).min(MAX_DEVICE_SLOTS);
    for (index, value) in values.take(bound).enumerate() {
        gauges.set(index, value);
    }
}

/// Whole megabytes, truncating
pub fn bytes_to_megabytes(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}

pub fn ingestion_megabytes_per_second(
    item_count: u64,
    dimension: u64,
    elapsed_secs: f64,
) -> Option<f64> {
    if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
        return None;
    }
    let bytes = item_count as f64 * dimension as f64 * VECTOR_COMPONENT_BYTES as f64;
    Some(bytes / elapsed_secs / BYTES_PER_MB as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_megabytes_truncates() {
        assert_eq!(bytes_to_megabytes(0), 0);
        assert_eq!(bytes_to_megabytes(BYTES_PER_MB - 1), 0);
        assert_eq!(bytes_to_megabytes(BYTES_PER_MB), 1);
        assert_eq!(bytes_to_megabytes(3 * BYTES_PER_MB + 512), 3);
    }

    #[test]
    fn ingestion_rate_in_megabytes() {
        assert_eq!(
            ingestion_megabytes_per_second(1000, 128, 1.0),
            Some(0.48828125)
        );
        assert_eq!(
            ingestion_megabytes_per_second(1000, 128, 2.0),
            Some(0.244140625)
        );
        assert_eq!(ingestion_megabytes_per_second(0, 128, 1.0), Some(0.0));
    }

    #[test]
    fn ingestion_rate_rejects_bad_elapsed() {
        assert_eq!(ingestion_megabytes_per_second(1000, 128, 0.0), None);
        assert_eq!(ingestion_megabytes_per_second(1000, 128, -1.0), None);
        assert_eq!(ingestion_megabytes_per_second(1000, 128, f64::NAN), None);
        assert_eq!(
            ingestion_megabytes_per_second(1000, 128, f64::INFINITY),
            None
        );
    }
}
