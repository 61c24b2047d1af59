//! Prometheus metrics module
//!
//! Registry, sampling facade and scrape endpoint for service health and
//! workload metrics.

mod exporter;
mod facade;
mod provider;
mod query_type;
mod registry;
mod system;

pub use exporter::{
    EXPORTER_WORKERS, ExporterHandle, ExporterStartTime, ExporterState, METRICS_PATH,
    MetricsExporter, MetricsExporterService, metrics_handler, metrics_routes,
};
pub use facade::{
    BYTES_PER_MB, SamplingFacade, VECTOR_COMPONENT_BYTES, bytes_to_megabytes,
    ingestion_megabytes_per_second,
};
pub use provider::ResourceSnapshotProvider;
pub use query_type::QueryIndexType;
pub use registry::{DeviceGauges, MAX_DEVICE_SLOTS, MetricRegistry};
pub use system::{SystemInfoProvider, spawn_resource_sampler};
