//! Resource snapshot provider
//!
//! The exporter never reads the OS or GPU driver itself; it asks a
//! [`ResourceSnapshotProvider`] for point-in-time readings.

/// Source of point-in-time resource readings.
///
/// Implementations own whatever state they need to answer (system handles,
/// driver sessions) and must be callable from any thread.
pub trait ResourceSnapshotProvider: Send + Sync {
    /// Host CPU usage in percent
    fn cpu_percent(&self) -> f64;

    /// Host memory usage in percent
    fn memory_percent(&self) -> f64;

    /// Number of GPU devices the provider knows about
    fn device_count(&self) -> usize;

    /// Per-device GPU utilization in percent, in device order
    fn gpu_percent(&self) -> Vec<u32>;

    /// Per-device GPU memory in use, in bytes, in device order
    fn gpu_memory_used_bytes(&self) -> Vec<u64>;
}
