//! Benchmarks for whole-print scenarios.
//!
//! A planner walks a gradient print layer by layer, stamping segments into
//! the ring buffer, and a stepper runner drains them pulse by pulse.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use colormix::{
    height::GradientSettings,
    stepper::{segment_queue, StepperRunner},
    Mixer, MixerConfig, Wide,
};
use rand::{rngs::SmallRng, SeedableRng};

const LAYERS: u32 = 50;
const LAYER_HEIGHT: f32 = 0.2;
const SEGMENTS_PER_LAYER: u32 = 4;

fn gradient_mixer() -> Mixer<Wide, 4, SmallRng> {
    let mut mixer = Mixer::with_rng(
        MixerConfig {
            user_tools: 4,
            ..Default::default()
        },
        SmallRng::seed_from_u64(5),
    )
    .unwrap();
    mixer
        .configure_gradient(GradientSettings {
            start_z: 0.0,
            end_z: LAYERS as f32 * LAYER_HEIGHT,
            start_tool: 0,
            end_tool: 3,
            pin: None,
        })
        .unwrap();
    mixer
}

pub fn bench_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/print");

    // Planner side only: height updates and snapshots.
    group.bench_function("plan_gradient", |b| {
        b.iter(|| {
            let mut mixer = gradient_mixer();
            for layer in 0..LAYERS {
                mixer.update_for_height(layer as f32 * LAYER_HEIGHT, false);
                for _ in 0..SEGMENTS_PER_LAYER {
                    black_box(mixer.plan_segment(100));
                }
            }
        })
    });

    // Planner and stepper through the ring buffer, one layer at a time.
    for steps in [100u32, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("plan_and_step", steps),
            &steps,
            |b, &steps| {
                b.iter(|| {
                    let mut mixer = gradient_mixer();
                    let (mut tx, rx) = segment_queue::<Wide, 4>(SEGMENTS_PER_LAYER as usize);
                    let mut runner = StepperRunner::<Wide, 4, _>::new(rx);
                    for layer in 0..LAYERS {
                        mixer.update_for_height(layer as f32 * LAYER_HEIGHT, false);
                        for _ in 0..SEGMENTS_PER_LAYER {
                            let _ = tx.push(mixer.plan_segment(steps));
                        }
                        runner.run(usize::MAX, |s| {
                            black_box(s);
                        });
                    }
                    black_box(runner.pulses());
                })
            },
        );
    }

    group.finish();
}
