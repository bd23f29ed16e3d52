//! Benchmarks for the pulse distributor.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use colormix::{BlockColor, MixColor, Narrow, PulseDistributor, Wide};

use crate::PULSE_BATCHES;

fn wide<const N: usize>(weights: [u16; N]) -> BlockColor<Wide, N> {
    BlockColor::try_from(MixColor::from_weights(weights)).unwrap()
}

pub fn bench_distributor(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixer/distributor");

    for &pulses in PULSE_BATCHES {
        // One dominant stepper: every call settles on the first visit.
        let pure = wide([0, 0, 0x8000, 0]);
        let mut distributor = PulseDistributor::<Wide, 4>::new();
        group.bench_with_input(BenchmarkId::new("pure_4", pulses), &pulses, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(distributor.next_stepper(black_box(&pure)));
                }
            })
        });

        // Trace component on the last stepper: the worst case scans all N.
        let trace = wide([0x8000, 0x0010, 0x0001, 0x0001, 0x0001, 0x0001]);
        let mut distributor = PulseDistributor::<Wide, 6>::new();
        group.bench_with_input(BenchmarkId::new("trace_6", pulses), &pulses, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(distributor.next_stepper(black_box(&trace)));
                }
            })
        });

        let blend = wide([0x8000, 0x5555, 0x2AAA, 0x1000]);
        let mut distributor = PulseDistributor::<Wide, 4>::new();
        group.bench_with_input(BenchmarkId::new("blend_4", pulses), &pulses, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(distributor.next_stepper(black_box(&blend)));
                }
            })
        });

        let narrow =
            BlockColor::try_from(MixColor::<Narrow, 4>::from_weights([0x80, 0x55, 0x2A, 0x10]))
                .unwrap();
        let mut distributor = PulseDistributor::<Narrow, 4>::new();
        group.bench_with_input(BenchmarkId::new("narrow_4", pulses), &pulses, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(distributor.next_stepper(black_box(&narrow)));
                }
            })
        });
    }

    group.finish();
}
