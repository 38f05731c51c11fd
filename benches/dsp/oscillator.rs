//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ky_dsp::{
    dsp::{sine::sin7, Cycle, Noise, Phasor, QuasiSaw},
    graph::Source,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Phasor - add and wrap
        let mut osc = Phasor::new(440.0, SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("phasor", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });

        // Cycle - interpolated lookup into the shared table
        let mut osc = Cycle::sine().with_frequency(440.0, SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("cycle", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });

        // sin7 over a phasor - polynomial instead of a table
        let mut phase = Phasor::new(440.0, SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("sin7", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = sin7(black_box(phase.process()));
                }
            })
        });

        // QuasiSaw - one sin() per sample plus feedback
        let mut osc = QuasiSaw::new(440.0, SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("quasi_saw", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });

        let mut osc = Noise::new(1);
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer)))
        });
    }

    group.finish();
}
