//! Benchmarks for graph building
//!
//! Builds graphs from synthetic lock trees shaped like real npm installs:
//! a wide hoisted root where every package requires a few others.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use npm_graph::graph::GraphBuilder;
use npm_graph::parser::{LockDependency, PackageJson, PackageLock};

/// Create a hoisted lock tree with `packages` entries, each requiring
/// `fan_out` later packages, plus a manifest listing the first `direct`.
fn create_project(packages: usize, fan_out: usize, direct: usize) -> (PackageJson, PackageLock) {
    let mut lock = PackageLock::new("bench-app");

    for i in 0..packages {
        let mut dep = LockDependency::new("1.0.0");
        for j in 1..=fan_out {
            let target = (i * 7 + j * 13) % packages;
            dep = dep.with_requires(format!("pkg-{}", target), "1.0.0");
        }
        if i % 10 == 0 {
            dep = dep.with_dependency(
                format!("pkg-{}", (i + 1) % packages),
                LockDependency::new("0.9.0").with_requires(format!("pkg-{}", (i + 2) % packages), "1.0.0"),
            );
        }
        lock = lock.with_dependency(format!("pkg-{}", i), dep);
    }

    let mut manifest = PackageJson {
        name: Some("bench-app".to_string()),
        ..PackageJson::default()
    };
    for i in 0..direct.min(packages) {
        manifest
            .dependencies
            .insert(format!("pkg-{}", i), "^1.0.0".to_string());
    }

    (manifest, lock)
}

/// Benchmark building graphs of increasing size
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [100, 1000, 5000].iter() {
        let (manifest, lock) = create_project(*size, 4, 20);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let graph = GraphBuilder::new(black_box(&manifest), black_box(&lock))
                    .build()
                    .unwrap();
                black_box(graph.link_count())
            });
        });
    }

    group.finish();
}

/// Benchmark serializing a built graph to JSON
fn bench_to_json(c: &mut Criterion) {
    let (manifest, lock) = create_project(5000, 4, 20);
    let graph = GraphBuilder::new(&manifest, &lock).build().unwrap();

    c.bench_function("graph_to_json_5000", |b| {
        b.iter(|| black_box(graph.to_json().unwrap()));
    });
}

criterion_group!(benches, bench_build, bench_to_json);
criterion_main!(benches);
