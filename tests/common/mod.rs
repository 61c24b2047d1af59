//! Shared test helpers

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use vecwise_metrics::metrics::{MetricRegistry, ResourceSnapshotProvider, SamplingFacade};

/// Readings returned by [`FakeProvider`]
#[derive(Debug, Clone, Default)]
pub struct Readings {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub device_count: usize,
    pub gpu_percent: Vec<u32>,
    pub gpu_memory_used_bytes: Vec<u64>,
}

/// Provider with readings settable from the test
#[derive(Default)]
pub struct FakeProvider {
    readings: Mutex<Readings>,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn update(&self, f: impl FnOnce(&mut Readings)) {
        f(&mut self.readings.lock());
    }

    /// Report `values` as GPU utilization with a matching device count
    pub fn set_gpus(&self, values: &[u32]) {
        self.update(|r| {
            r.device_count = values.len();
            r.gpu_percent = values.to_vec();
        });
    }
}

impl ResourceSnapshotProvider for FakeProvider {
    fn cpu_percent(&self) -> f64 {
        self.readings.lock().cpu_percent
    }

    fn memory_percent(&self) -> f64 {
        self.readings.lock().memory_percent
    }

    fn device_count(&self) -> usize {
        self.readings.lock().device_count
    }

    fn gpu_percent(&self) -> Vec<u32> {
        self.readings.lock().gpu_percent.clone()
    }

    fn gpu_memory_used_bytes(&self) -> Vec<u64> {
        self.readings.lock().gpu_memory_used_bytes.clone()
    }
}

/// Facade over a fresh registry, fed by a fake provider
pub fn facade(enabled: bool) -> (SamplingFacade, Arc<FakeProvider>) {
    let provider = FakeProvider::new();
    let registry = Arc::new(MetricRegistry::new().expect("Failed to create registry"));
    let facade = SamplingFacade::new(enabled, registry, provider.clone());
    (facade, provider)
}
