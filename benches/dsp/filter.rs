//! Benchmarks for the one-pole low-pass and slew limiter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ky_dsp::{
    dsp::{OnePole, SlewRateLimit},
    graph::Processor,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut filter = OnePole::new(1_000.0, SAMPLE_RATE).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("one_pole", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process_block(black_box(&mut buffer));
            })
        });

        let mut slew = SlewRateLimit::new(0.0, 10.0, SAMPLE_RATE).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("slew", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                slew.process_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
