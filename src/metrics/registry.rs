//! Metrics registry
//!
//! Defines every Prometheus instrument the exporter publishes. The catalog
//! is fixed: instruments are created and registered once in
//! [`MetricRegistry::new`] and live as long as the registry.

use prometheus::{Encoder, Gauge, GaugeVec, IntGauge, Opts, Registry, TextEncoder};

use super::QueryIndexType;
use crate::errors::{ExporterError, Result};

/// Maximum number of GPU device slots tracked per device family
pub const MAX_DEVICE_SLOTS: usize = 8;

/// Label carrying the device slot index
const DEVICE_LABEL: &str = "device";

/// A bounded, ordered set of gauges, one per device slot `0..len`.
///
/// Every slot is created up front so it is scrapeable before the first
/// sample. Slots are never removed; a slot that is not written in a
/// sampling pass keeps its previous value.
#[derive(Clone)]
pub struct DeviceGauges {
    family: GaugeVec,
    slots: Vec<Gauge>,
}

impl DeviceGauges {
    fn new(name: &str, help: &str, slot_count: usize) -> Result<Self> {
        let family = GaugeVec::new(Opts::new(name, help), &[DEVICE_LABEL])?;
        let slots = (0..slot_count)
            .map(|index| {
                let label = index.to_string();
                family.get_metric_with_label_values(&[label.as_str()])
            })
            .collect::<prometheus::Result<Vec<_>>>()?;

        Ok(Self { family, slots })
    }

    /// Overwrite slot `index`. Returns false when the index is out of range.
    pub fn set(&self, index: usize, value: f64) -> bool {
        match self.slots.get(index) {
            Some(gauge) => {
                gauge.set(value);
                true
            }
            None => false,
        }
    }

    /// Current value of slot `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.slots.get(index).map(Gauge::get)
    }

    /// Snapshot of every slot, in index order
    pub fn values(&self) -> Vec<f64> {
        self.slots.iter().map(Gauge::get).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Application metrics container
pub struct MetricRegistry {
    /// Internal Prometheus registry
    registry: Registry,

    // ===== Resource metrics =====
    /// Host CPU usage in percent
    pub cpu_usage_percent: Gauge,
    /// Host RAM usage in percent
    pub ram_usage_percent: Gauge,
    /// GPU utilization in percent, one slot per device
    pub gpu_usage_percent: DeviceGauges,
    /// GPU memory in use (MB), one slot per device
    pub gpu_memory_usage_mb: DeviceGauges,

    // ===== Workload metrics =====
    /// Vector ingestion throughput in MB/s
    pub ingestion_throughput_mb_per_second: Gauge,
    /// Query throughput on IVF indexes
    pub query_ivf_per_second: Gauge,
    /// Query throughput on IDMap indexes
    pub query_idmap_per_second: Gauge,

    // ===== Connection metrics =====
    /// Active client connections; may go below zero on unbalanced decrements
    pub connection_count: IntGauge,

    // ===== Process metrics =====
    /// Build information (always 1, labelled with the crate version)
    pub build_info: GaugeVec,
    /// Exporter uptime in seconds, refreshed on scrape
    pub uptime_seconds: Gauge,
}

impl MetricRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        // Resource metrics
        let cpu_usage_percent = Gauge::new(
            "vecwise_cpu_usage_percent",
            "CPU usage of the host in percent",
        )?;
        let ram_usage_percent = Gauge::new(
            "vecwise_ram_usage_percent",
            "RAM usage of the host in percent",
        )?;
        let gpu_usage_percent = DeviceGauges::new(
            "vecwise_gpu_usage_percent",
            "GPU utilization in percent by device slot",
            MAX_DEVICE_SLOTS,
        )?;
        let gpu_memory_usage_mb = DeviceGauges::new(
            "vecwise_gpu_memory_usage_megabytes",
            "GPU memory in use in megabytes by device slot",
            MAX_DEVICE_SLOTS,
        )?;

        // Workload metrics
        let ingestion_throughput_mb_per_second = Gauge::new(
            "vecwise_add_vectors_megabytes_per_second",
            "Vector ingestion throughput in MB/s",
        )?;
        let query_throughput = GaugeVec::new(
            Opts::new(
                "vecwise_query_per_second",
                "Query throughput by index type",
            ),
            &["index_type"],
        )?;
        let query_ivf_per_second =
            query_throughput.get_metric_with_label_values(&[QueryIndexType::Ivf.as_ref()])?;
        let query_idmap_per_second =
            query_throughput.get_metric_with_label_values(&[QueryIndexType::IdMap.as_ref()])?;

        // Connection metrics
        let connection_count = IntGauge::new(
            "vecwise_connection_count",
            "Number of active client connections",
        )?;

        // Process metrics
        let build_info = GaugeVec::new(
            Opts::new("vecwise_build_info", "Build information"),
            &["version"],
        )?;
        build_info
            .get_metric_with_label_values(&[env!("CARGO_PKG_VERSION")])?
            .set(1.0);
        let uptime_seconds = Gauge::new(
            "vecwise_uptime_seconds",
            "Exporter uptime in seconds",
        )?;

        // Register all metrics
        registry.register(Box::new(cpu_usage_percent.clone()))?;
        registry.register(Box::new(ram_usage_percent.clone()))?;
        registry.register(Box::new(gpu_usage_percent.family.clone()))?;
        registry.register(Box::new(gpu_memory_usage_mb.family.clone()))?;
        registry.register(Box::new(ingestion_throughput_mb_per_second.clone()))?;
        registry.register(Box::new(query_throughput))?;
        registry.register(Box::new(connection_count.clone()))?;
        registry.register(Box::new(build_info.clone()))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry,
            cpu_usage_percent,
            ram_usage_percent,
            gpu_usage_percent,
            gpu_memory_usage_mb,
            ingestion_throughput_mb_per_second,
            query_ivf_per_second,
            query_idmap_per_second,
            connection_count,
            build_info,
            uptime_seconds,
        })
    }

    /// Gauge backing the given query index type
    pub fn query_gauge(&self, index_type: QueryIndexType) -> &Gauge {
        match index_type {
            QueryIndexType::Ivf => &self.query_ivf_per_second,
            QueryIndexType::IdMap => &self.query_idmap_per_second,
        }
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| ExporterError::encoding(e.to_string()))?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_gauges_are_bounded() {
        let gauges = DeviceGauges::new("test_device_gauge", "test", 3).unwrap();
        assert_eq!(gauges.len(), 3);
        assert!(gauges.set(2, 5.0));
        assert!(!gauges.set(3, 5.0));
        assert_eq!(gauges.values(), vec![0.0, 0.0, 5.0]);
        assert_eq!(gauges.get(3), None);
    }

    #[test]
    fn every_slot_is_exported_before_any_sample() {
        let registry = MetricRegistry::new().unwrap();
        let output = registry.export().unwrap();

        for slot in 0..MAX_DEVICE_SLOTS {
            assert!(output.contains(&format!(
                "vecwise_gpu_usage_percent{{device=\"{}\"}} 0",
                slot
            )));
            assert!(output.contains(&format!(
                "vecwise_gpu_memory_usage_megabytes{{device=\"{}\"}} 0",
                slot
            )));
        }
    }

    #[test]
    fn query_gauge_dispatch() {
        let registry = MetricRegistry::new().unwrap();
        registry.query_gauge(QueryIndexType::IdMap).set(3.0);
        assert_eq!(registry.query_idmap_per_second.get(), 3.0);
        assert_eq!(registry.query_ivf_per_second.get(), 0.0);
    }
}
