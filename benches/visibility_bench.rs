//! Sweep benchmarks over random wall scenes

use bomb_visibility::city::{BarrierShape, City, Shape};
use bomb_visibility::core::{ShapeId, VisibilityConfig};
use bomb_visibility::geometry::Segment;
use bomb_visibility::visibility::{SortStrategy, VisibilityContext};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_city(walls: u32, seed: u64) -> City {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (1..=walls)
        .map(|id| {
            let start = Vec2::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0));
            let end = start + Vec2::new(rng.gen_range(-30.0..30.0), rng.gen_range(-30.0..30.0));
            Shape::Barrier(BarrierShape {
                id: ShapeId(id),
                segment: Segment::new(start, end),
                color: "black".into(),
            })
        })
        .collect()
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_sweep");
    for walls in [10u32, 100, 1000] {
        let city = random_city(walls, 42);
        group.bench_with_input(BenchmarkId::from_parameter(walls), &city, |b, city| {
            let config = VisibilityConfig::default();
            b.iter(|| {
                VisibilityContext::build(black_box(city), Vec2::new(500.0, 500.0), &config)
                    .map(|ctx| ctx.region().len())
            })
        });
    }
    group.finish();
}

fn bench_sort_strategies(c: &mut Criterion) {
    let city = random_city(500, 7);
    let mut group = c.benchmark_group("event_sort");
    for strategy in [SortStrategy::Insertion, SortStrategy::Merge, SortStrategy::Quick] {
        let mut config = VisibilityConfig::default();
        config.sort.strategy = strategy;
        group.bench_function(format!("{strategy:?}"), |b| {
            b.iter(|| VisibilityContext::build(black_box(&city), Vec2::new(500.0, 500.0), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep, bench_sort_strategies);
criterion_main!(benches);
