// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full overlap ticks: move bodies through the transform tree, then check.
//!
//! By default this uses a deterministic synthetic shooter scene. To benchmark a
//! captured scene instead, set `COLLIDE_SCENE_JSON` to the path of a JSON dump
//! matching [`SceneDump`].

use std::fs;
use std::path::Path;

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Affine, Size};
use serde::Deserialize;
use understory_broad_phase::{BoxIntersector, BruteForce, SweepAndPrune, UniformGrid};
use understory_collide::{
    CircleCollisionShape, Collision, CollisionGroup, CollisionId, CollisionSet, GroupTable,
    OverlapChecker, RectCollisionShape,
};
use understory_transform_tree::TransformTree;

const ENV_JSON_PATH: &str = "COLLIDE_SCENE_JSON";

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DumpShape {
    Rect { width: f64, height: f64 },
    Circle { radius: f64 },
}

#[derive(Clone, Debug, Deserialize)]
struct DumpBody {
    x: f64,
    y: f64,
    /// A preset name from [`GroupTable::presets`].
    group: String,
    #[serde(default)]
    huge: bool,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    shapes: Vec<DumpShape>,
}

fn enabled_by_default() -> bool {
    true
}

/// A captured scene: a flat list of bodies with their world positions.
#[derive(Clone, Debug, Deserialize)]
struct SceneDump {
    bodies: Vec<DumpBody>,
}

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

struct Scene {
    tree: TransformTree,
    set: CollisionSet,
    movers: Vec<CollisionId>,
}

/// Player, enemies, bullets, pickups, and four world walls.
fn synthetic_dump(bodies: usize) -> SceneDump {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    let mut out = Vec::with_capacity(bodies + 5);
    let wall = |x, y, width, height| DumpBody {
        x,
        y,
        group: "terrain".into(),
        huge: true,
        enabled: true,
        shapes: vec![DumpShape::Rect { width, height }],
    };
    out.push(wall(1000.0, 0.0, 2000.0, 16.0));
    out.push(wall(1000.0, 2000.0, 2000.0, 16.0));
    out.push(wall(0.0, 1000.0, 16.0, 2000.0));
    out.push(wall(2000.0, 1000.0, 16.0, 2000.0));
    out.push(DumpBody {
        x: 1000.0,
        y: 1000.0,
        group: "player".into(),
        huge: false,
        enabled: true,
        shapes: vec![
            DumpShape::Rect {
                width: 24.0,
                height: 24.0,
            },
            DumpShape::Circle { radius: 60.0 },
        ],
    });
    for i in 0..bodies {
        let (group, shape) = match i % 4 {
            0 => ("enemy", DumpShape::Rect { width: 20.0, height: 20.0 }),
            1 => ("item", DumpShape::Circle { radius: 6.0 }),
            2 => ("playerBullet", DumpShape::Circle { radius: 3.0 }),
            _ => ("enemyBullet", DumpShape::Circle { radius: 3.0 }),
        };
        out.push(DumpBody {
            x: rng.next_f64() * 2000.0,
            y: rng.next_f64() * 2000.0,
            group: group.into(),
            huge: false,
            enabled: i % 17 != 0,
            shapes: vec![shape],
        });
    }
    SceneDump { bodies: out }
}

fn build_scene(dump: &SceneDump) -> Scene {
    let presets = GroupTable::presets();
    let mut tree = TransformTree::new();
    let mut set = CollisionSet::new();
    let mut movers = Vec::new();
    for body in &dump.bodies {
        let mut col = Collision::new(&mut tree);
        col.set_group(presets.get(&body.group).unwrap_or(CollisionGroup::ALL));
        col.set_is_huge_number(body.huge);
        col.set_enable(body.enabled);
        tree.set_local(col.transform(), Affine::translate((body.x, body.y)))
            .expect("fresh transform");
        for shape in &body.shapes {
            match *shape {
                DumpShape::Rect { width, height } => {
                    let rect = RectCollisionShape::new(&mut tree, Size::new(width, height));
                    col.add_shape(&mut tree, rect).expect("fresh shape");
                }
                DumpShape::Circle { radius } => {
                    let circle = CircleCollisionShape::new(&mut tree, radius);
                    col.add_shape(&mut tree, circle).expect("fresh shape");
                }
            }
        }
        let huge = body.huge;
        let id = set.insert(col);
        if !huge {
            movers.push(id);
        }
    }
    Scene { tree, set, movers }
}

fn load_dump(n: usize) -> SceneDump {
    match std::env::var(ENV_JSON_PATH) {
        Ok(path) => {
            let text = fs::read_to_string(Path::new(&path)).expect("read scene dump");
            serde_json::from_str(&text).expect("parse scene dump")
        }
        Err(_) => synthetic_dump(n),
    }
}

/// Nudges every moving body, as a game tick would.
fn step(scene: &mut Scene, tick: u32) {
    let dx = if tick % 2 == 0 { 1.5 } else { -1.5 };
    for &id in &scene.movers {
        let tf = scene.set.get(id).expect("live mover").transform();
        let local = scene.tree.local(tf).expect("live transform");
        scene
            .tree
            .set_local(tf, Affine::translate((dx, 0.0)) * local)
            .expect("live transform");
    }
}

fn bench_checker<I: BoxIntersector>(
    b: &mut criterion::Bencher<'_>,
    dump: &SceneDump,
    make: impl Fn() -> I,
) {
    let mut scene = build_scene(dump);
    let mut checker = OverlapChecker::with_intersector(make());
    let mut tick = 0_u32;
    b.iter(|| {
        step(&mut scene, tick);
        tick = tick.wrapping_add(1);
        let result = checker.check(&scene.set, &scene.tree);
        black_box(result.len())
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_tick");
    for &n in &[256_usize, 1024, 4096] {
        let dump = load_dump(n);
        group.throughput(Throughput::Elements(dump.bodies.len() as u64));
        if n <= 256 {
            group.bench_function(BenchmarkId::new("BruteForce", n), |b| {
                bench_checker(b, &dump, BruteForce::new);
            });
        }
        group.bench_function(BenchmarkId::new("SweepAndPrune", n), |b| {
            bench_checker(b, &dump, SweepAndPrune::new);
        });
        group.bench_function(BenchmarkId::new("Grid(64.)", n), |b| {
            bench_checker(b, &dump, || UniformGrid::new(64.0));
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_build");
    for &n in &[1024_usize, 4096] {
        let dump = load_dump(n);
        group.throughput(Throughput::Elements(dump.bodies.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter_batched(
                || dump.clone(),
                |dump| black_box(build_scene(&dump).set.len()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick, bench_build);
criterion_main!(benches);
