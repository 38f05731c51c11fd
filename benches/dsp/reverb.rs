//! Benchmarks for reverb processing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ky_dsp::{dsp::FdnReverb, params::ReverbParams};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        // Generate a test signal (impulse-like with some content)
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0) // Initial impulse
                } else {
                    (i as f32 * 0.05).sin() * 0.1 // Quiet tail
                }
            })
            .collect();

        // Default five-channel network
        let mut reverb = FdnReverb::<5>::new(&ReverbParams::default(), SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("fdn_5", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &sample in &input {
                    sum += reverb.process(black_box(sample));
                }
                sum
            })
        });

        // Eight channels: the matrix mix grows with N squared
        let params = ReverbParams {
            decay_time: 4.0,
            ..ReverbParams::default()
        };
        let mut reverb = FdnReverb::<8>::new(&params, SAMPLE_RATE).unwrap();
        group.bench_with_input(BenchmarkId::new("fdn_8", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &sample in &input {
                    sum += reverb.process(black_box(sample));
                }
                sum
            })
        });
    }

    group.finish();
}
