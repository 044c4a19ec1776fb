//! Criterion microbenches for triangle synthesis, scene assembly and the oracle.
//!
//! - triangle: one accepted draw (radii, rigid transform, rounding).
//! - scene: 100–200 triangles in a 50³ box.
//! - oracle: Qbvh broad phase vs. all pairs on the same scene.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use trigen::prelude::*;

fn group_cfg(min: usize, max: usize) -> GroupConfig {
    GroupConfig {
        half: HalfExtents {
            x: 50.0,
            y: 50.0,
            z: 50.0,
        },
        number: 1,
        length: CountRange { min, max },
        mean: 3.0,
        std: 1.0,
        round: 4,
        test_fmt_string: "bench{}.dat".into(),
        ans_fmt_string: "bench{}.ans".into(),
        ans_format: AnswerFormat::Indices,
        max_attempts: 16,
    }
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");
    let params = SceneParams::from_group(&group_cfg(100, 201)).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    group.bench_function(BenchmarkId::new("draw_triangle", "mean3"), |b| {
        b.iter(|| {
            let _ = draw_triangle(&mut rng, &params).unwrap();
        })
    });
    group.bench_function(BenchmarkId::new("build_scene", "100-200"), |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(7),
            |mut rng| {
                let _ = build_scene(&mut rng, &params).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("render_scene", "100-200"), |b| {
        let scene = build_scene(&mut StdRng::seed_from_u64(8), &params).unwrap();
        b.iter(|| render_scene(&scene, params.digits))
    });
    group.finish();
}

fn bench_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("oracle");
    let params = SceneParams::from_group(&group_cfg(500, 501)).unwrap();
    let scene = build_scene(&mut StdRng::seed_from_u64(2025), &params).unwrap();
    group.bench_function(BenchmarkId::new("qbvh", "500"), |b| {
        b.iter(|| ParryOracle.evaluate(&scene.triangles).unwrap())
    });
    group.bench_function(BenchmarkId::new("all_pairs", "500"), |b| {
        b.iter(|| BruteForceOracle.evaluate(&scene.triangles).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_synthesis, bench_oracle);
criterion_main!(benches);
