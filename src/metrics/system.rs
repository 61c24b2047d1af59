//! System metrics collection
//!
//! `SystemInfoProvider` reads host CPU and memory usage with sysinfo.
//! A background task periodically pushes resource readings through the
//! sampling facade.

use std::sync::Arc;

use parking_lot::Mutex;
use sysinfo::System;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::debug;

use super::{ResourceSnapshotProvider, SamplingFacade};

/// Host resource provider backed by sysinfo.
///
/// Reports no GPU devices; hosts with GPUs inject their own provider.
pub struct SystemInfoProvider {
    system: Mutex<System>,
}

impl SystemInfoProvider {
    pub fn new() -> Self {
        let mut system = System::new();
        // CPU usage is computed between two refreshes, prime the first one
        system.refresh_cpu_usage();
        system.refresh_memory();
        Self {
            system: Mutex::new(system),
        }
    }
}

impl Default for SystemInfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceSnapshotProvider for SystemInfoProvider {
    fn cpu_percent(&self) -> f64 {
        let mut sys = self.system.lock();
        sys.refresh_cpu_usage();
        sys.global_cpu_usage() as f64
    }

    fn memory_percent(&self) -> f64 {
        let mut sys = self.system.lock();
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return 0.0;
        }
        sys.used_memory() as f64 / total as f64 * 100.0
    }

    fn device_count(&self) -> usize {
        0
    }

    fn gpu_percent(&self) -> Vec<u32> {
        Vec::new()
    }

    fn gpu_memory_used_bytes(&self) -> Vec<u64> {
        Vec::new()
    }
}

/// Spawn a background task that samples resources every `period`.
///
/// Should be called once during startup; abort the returned handle to stop.
pub fn spawn_resource_sampler(facade: Arc<SamplingFacade>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            facade.sample_resources();
            debug!("Resource metrics sampled");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_percent_is_a_percentage() {
        let provider = SystemInfoProvider::new();
        let percent = provider.memory_percent();
        assert!((0.0..=100.0).contains(&percent));
    }

    #[test]
    fn reports_no_gpu_devices() {
        let provider = SystemInfoProvider::new();
        assert_eq!(provider.device_count(), 0);
        assert!(provider.gpu_percent().is_empty());
        assert!(provider.gpu_memory_used_bytes().is_empty());
    }
}
