//! Benchmarks for percentage normalization and color conversion.

use std::hint::black_box;

use criterion::Criterion;
use colormix::{MixColor, PercentMix, Wide};

pub fn bench_percent(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixer/percent");

    let ragged = PercentMix::new([37, -4, 81, 12, 0, 9]);
    group.bench_function("normalize_6", |b| {
        b.iter(|| black_box(black_box(&ragged).normalized()))
    });

    let mix = PercentMix::new([40, 30, 20, 10, 0, 0]);
    group.bench_function("to_color_6", |b| {
        b.iter(|| black_box(black_box(&mix).to_color::<Wide>()))
    });

    let color = MixColor::<Wide, 6>::from_weights([0x8000, 0x6000, 0x4000, 0x2000, 0x0007, 0]);
    group.bench_function("from_color_6", |b| {
        b.iter(|| black_box(PercentMix::from_color(black_box(&color))))
    });

    let start = PercentMix::new([100, 0, 0, 0, 0, 0]);
    let end = PercentMix::new([0, 20, 20, 20, 20, 20]);
    group.bench_function("blend_6", |b| {
        let mut t = 0.0f32;
        b.iter(|| {
            t = (t + 0.013) % 1.0;
            black_box(PercentMix::blend(&start, &end, black_box(t)).to_color::<Wide>())
        })
    });

    group.finish();
}
