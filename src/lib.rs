//! Vecwise metrics - a process-embedded Prometheus exporter
//!
//! Keeps gauges describing the health and workload of a running vector
//! search service (CPU/RAM/GPU usage, GPU memory, ingestion and query
//! throughput, active connections) and serves them for scraping at
//! `/metrics` in the Prometheus text format.
//!
//! # Architecture
//! - `metrics`: registry, sampling facade, resource provider, scrape endpoint
//! - `metrics_core`: `MetricsRecorder` trait for dependency injection
//! - `config`: Configuration management
//! - `runtime`: Exporter lifecycle
//! - `system`: Logging initialization

pub mod config;
pub mod errors;
pub mod metrics;
pub mod metrics_core;
pub mod runtime;
pub mod system;
