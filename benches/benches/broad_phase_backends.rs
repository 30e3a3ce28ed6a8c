// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw pair finding: every `BoxIntersector` backend on the same box sets.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_broad_phase::{Box2D, BoxIntersector, BruteForce, SweepAndPrune, UniformGrid};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `count` boxes of side `size` scattered uniformly over a `world`-sized square.
fn gen_scattered(count: usize, world: f64, size: f64, seed: u64) -> Vec<Box2D> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * world;
            let y = rng.next_f64() * world;
            Box2D::new(x, y, x + size, y + size)
        })
        .collect()
}

/// Tight clusters of small boxes, the worst case for a coarse grid.
fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Box2D> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let (cx, cy) = (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0);
        for _ in 0..per_cluster {
            let x = cx + (rng.next_f64() - 0.5) * spread;
            let y = cy + (rng.next_f64() - 0.5) * spread;
            out.push(Box2D::new(x, y, x + 12.0, y + 12.0));
        }
    }
    out
}

fn bench_all_vs_all(c: &mut Criterion, name: &str, make: impl Fn(usize) -> Vec<Box2D>) {
    fn run<I: BoxIntersector>(b: &mut criterion::Bencher<'_>, boxes: &[Box2D], mut backend: I) {
        let mut out = Vec::new();
        b.iter(|| {
            backend.all_vs_all(black_box(boxes), &mut out);
            black_box(out.len())
        });
    }

    let mut group = c.benchmark_group(name);
    for &n in &[64_usize, 256, 1024] {
        let boxes = make(n);
        group.throughput(Throughput::Elements(n as u64));
        if n <= 256 {
            group.bench_with_input(BenchmarkId::new("BruteForce", n), &boxes, |b, boxes| {
                run(b, boxes, BruteForce::new());
            });
        }
        group.bench_with_input(BenchmarkId::new("SweepAndPrune", n), &boxes, |b, boxes| {
            run(b, boxes, SweepAndPrune::new());
        });
        group.bench_with_input(BenchmarkId::new("Grid(32.)", n), &boxes, |b, boxes| {
            run(b, boxes, UniformGrid::new(32.0));
        });
        group.bench_with_input(BenchmarkId::new("Grid(128.)", n), &boxes, |b, boxes| {
            run(b, boxes, UniformGrid::new(128.0));
        });
    }
    group.finish();
}

fn bench_scattered(c: &mut Criterion) {
    bench_all_vs_all(c, "all_vs_all_scattered", |n| {
        gen_scattered(n, 2000.0, 24.0, 0x3C6E_F35F_4750_2932)
    });
}

fn bench_clustered(c: &mut Criterion) {
    bench_all_vs_all(c, "all_vs_all_clustered", |n| gen_clustered(n / 16, 16, 60.0));
}

fn bench_alpha_vs_beta(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_vs_beta_few_large");
    // Many small bodies against a handful of walls spanning the world.
    let walls = [
        Box2D::new(0.0, 0.0, 2000.0, 16.0),
        Box2D::new(0.0, 1984.0, 2000.0, 2000.0),
        Box2D::new(0.0, 0.0, 16.0, 2000.0),
        Box2D::new(1984.0, 0.0, 2000.0, 2000.0),
    ];
    for &n in &[256_usize, 1024, 4096] {
        let bodies = gen_scattered(n, 2000.0, 12.0, 0xFACE_FEED_CAFE_BABE);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("SweepAndPrune", n), |b| {
            let mut sap = SweepAndPrune::new();
            let mut out = Vec::new();
            b.iter(|| {
                sap.alpha_vs_beta(black_box(&bodies), &walls, &mut out);
                black_box(out.len())
            });
        });
        group.bench_function(BenchmarkId::new("Grid(64.)", n), |b| {
            let mut grid = UniformGrid::new(64.0);
            let mut out = Vec::new();
            b.iter(|| {
                grid.alpha_vs_beta(black_box(&bodies), &walls, &mut out);
                black_box(out.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scattered, bench_clustered, bench_alpha_vs_beta);
criterion_main!(benches);
