//! Basic benchmarks for the `instance_pool` package.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use instance_pool::{InstancePool, Placement, PoolKey, Vehicle, VehicleKind};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("ip_acquire");

    group.bench_function("first_acquire", |b| {
        b.iter(|| {
            let pool = InstancePool::<VehicleKind, Vehicle>::new();
            drop(black_box(pool.acquire(VehicleKind::Suv)));
            pool
        });
    });

    let warm_pool = InstancePool::<VehicleKind, Vehicle>::new();
    for kind in VehicleKind::variants() {
        drop(warm_pool.acquire(*kind));
    }

    group.bench_function("repeat_acquire", |b| {
        b.iter(|| black_box(warm_pool.acquire(black_box(VehicleKind::Compact))));
    });

    group.bench_function("acquire_named", |b| {
        b.iter(|| black_box(warm_pool.acquire_named(black_box("subcompact"))));
    });

    group.finish();

    let mut render_group = c.benchmark_group("ip_render");

    let placement = Placement::new("silver", 42, 24);

    render_group.bench_function("every_kind", |b| {
        b.iter(|| {
            for kind in VehicleKind::variants() {
                if let Ok(vehicle) = warm_pool.acquire(*kind) {
                    black_box(vehicle.render(&placement));
                }
            }
        });
    });

    render_group.finish();
}
