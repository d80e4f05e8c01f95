// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_fling::{FlingPhysics, FlingSpline, VelocityEstimator, WindowedVelocity};

fn bench_fling(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_fling");

    group.bench_function("spline_table", |b| {
        b.iter(|| black_box(FlingSpline::new()));
    });

    let physics = FlingPhysics::new(FlingPhysics::DEFAULT_FRICTION, 2.625);
    for &velocity in &[500.0_f64, 4_000.0, 8_000.0] {
        group.bench_function(format!("run_to_rest(v={velocity})"), |b| {
            b.iter(|| {
                let mut fling = physics.start(0.0, black_box(velocity), 0.0..=1.0e6, 0);
                let mut now = 0;
                let mut frames = 0_u32;
                while fling.step(physics.spline(), now).is_some() {
                    now += 16;
                    frames += 1;
                }
                black_box(frames)
            });
        });
    }

    group.bench_function("velocity(200 samples)", |b| {
        b.iter(|| {
            let mut estimator = WindowedVelocity::default();
            for i in 0..200_u64 {
                estimator.add_sample(i * 8, i as f64 * 12.5);
            }
            black_box(estimator.estimate_release_velocity())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fling);
criterion_main!(benches);
