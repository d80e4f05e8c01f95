// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{BezPath, Line, Point, Rect};
use peniko::Color;
use understory_calibration::{DrawSurface, ScaleConfig, ScaleModel};

/// Counts draw calls so painting has an observable result.
#[derive(Default)]
struct CountingSurface {
    ops: usize,
}

impl DrawSurface for CountingSurface {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.ops += 1;
    }

    fn fill_path(&mut self, _path: &BezPath, _color: Color) {
        self.ops += 1;
    }

    fn stroke_line(&mut self, _line: Line, _width: f64, _color: Color) {
        self.ops += 1;
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        7.0 * text.len() as f64
    }

    fn draw_text(&mut self, _text: &str, _origin: Point, _color: Color) {
        self.ops += 1;
    }
}

fn model(units: i32) -> ScaleModel {
    let mut model = ScaleModel::new(ScaleConfig::new(0, units, 10.0)).unwrap();
    model.on_size_changed(1_080.0, 200.0);
    model
}

fn bench_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_calibration");

    for &units in &[100_i32, 1_000, 10_000] {
        let model = model(units);

        group.bench_function(format!("ticks(units={units})"), |b| {
            b.iter(|| black_box(model.ticks().filter(|t| t.is_major).count()));
        });

        group.bench_function(format!("snapshot(units={units})"), |b| {
            b.iter(|| black_box(model.snapshot()));
        });

        group.bench_function(format!("paint(units={units})"), |b| {
            b.iter(|| {
                let mut surface = CountingSurface::default();
                understory_calibration::paint(&model, &mut surface);
                black_box(surface.ops)
            });
        });
    }

    group.bench_function("drag(1000 moves)", |b| {
        b.iter(|| {
            let mut model = model(1_000);
            for i in 0..1_000 {
                let delta = if i % 2 == 0 { 37.0 } else { -23.0 };
                model.apply_drag(black_box(delta));
            }
            black_box(model.viewport_offset_px())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_calibration);
criterion_main!(benches);
