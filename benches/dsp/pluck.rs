//! Benchmarks for the plucked string.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ky_dsp::{
    dsp::{PluckedString, Rng},
    graph::Source,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_pluck(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pluck");
    let mut rng = Rng::new_with_seed(1);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut string = PluckedString::new(55.0, SAMPLE_RATE).unwrap();
        string.set(220.0, 4.0).unwrap();
        string.pluck(1.0, &mut rng);
        group.bench_with_input(BenchmarkId::new("ringing", size), &size, |b, _| {
            b.iter(|| string.render(black_box(&mut buffer)))
        });

        // Excitation cost: one period of noise written per pluck
        let mut string = PluckedString::new(55.0, SAMPLE_RATE).unwrap();
        string.set(55.0, 1.0).unwrap();
        group.bench_with_input(BenchmarkId::new("pluck_and_render", size), &size, |b, _| {
            b.iter(|| {
                string.pluck(black_box(1.0), &mut rng);
                string.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
