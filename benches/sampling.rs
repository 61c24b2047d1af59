//! Sampling facade hot-path benchmarks

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use vecwise_metrics::metrics::{MetricRegistry, ResourceSnapshotProvider, SamplingFacade};

struct FixedProvider;

impl ResourceSnapshotProvider for FixedProvider {
    fn cpu_percent(&self) -> f64 {
        42.0
    }

    fn memory_percent(&self) -> f64 {
        58.0
    }

    fn device_count(&self) -> usize {
        8
    }

    fn gpu_percent(&self) -> Vec<u32> {
        vec![10, 20, 30, 40, 50, 60, 70, 80]
    }

    fn gpu_memory_used_bytes(&self) -> Vec<u64> {
        vec![1 << 30; 8]
    }
}

fn facade(enabled: bool) -> SamplingFacade {
    let registry = Arc::new(MetricRegistry::new().expect("Failed to create registry"));
    SamplingFacade::new(enabled, registry, Arc::new(FixedProvider))
}

fn bench_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("facade/updates");

    let enabled = facade(true);
    group.bench_function("connection_inc_dec", |b| {
        b.iter(|| {
            enabled.inc_connection_count();
            enabled.dec_connection_count();
        });
    });

    group.bench_function("query_throughput_known", |b| {
        b.iter(|| enabled.record_query_throughput(black_box("IVF"), black_box(12.0)));
    });

    group.bench_function("query_throughput_unknown", |b| {
        b.iter(|| enabled.record_query_throughput(black_box("HNSW"), black_box(12.0)));
    });

    group.bench_function("ingestion_throughput", |b| {
        b.iter(|| {
            enabled.record_ingestion_throughput(black_box(1000), black_box(128), black_box(0.5))
        });
    });

    group.bench_function("sample_resources", |b| {
        b.iter(|| enabled.sample_resources());
    });

    let disabled = facade(false);
    group.bench_function("disabled_sample_resources", |b| {
        b.iter(|| disabled.sample_resources());
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let facade = facade(true);
    facade.sample_resources();

    c.bench_function("registry/export", |b| {
        b.iter(|| black_box(facade.registry().export().expect("export failed")));
    });
}

criterion_group!(benches, bench_updates, bench_export);
criterion_main!(benches);
