//! Feedback delay network reverberator.
//!
//! `N` delay lines of mutually unrelated lengths feed each other through an
//! orthogonal mixing matrix. Every output sample is the sum of all line taps,
//! so echoes from one line spread to all others and the echo density grows
//! quickly into a diffuse tail.
//!
//! # Signal Flow
//!
//! ```text
//!              ┌─────────────────────────────────────────────┐
//!              │                                             │
//! x ──┬──→ (+) ┴→ [delay 0..N] ──→ y ──→ Q · y ──→ × g_i ────┘
//!     │                            │
//!     │                            └──→ Σ y ──→ (+) ──→ out
//!     └──────────────→ × dry ────────────────────↑
//! ```
//!
//! # Mixing Matrix
//!
//! `Q` starts as a seeded Gaussian matrix and is orthonormalized, so it
//! neither adds nor removes energy. The seed makes the whole reverberator
//! reproducible: the same parameters give bit-identical output.
//!
//! # Decay
//!
//! Channel `i` loses `60 · delay_i / t60` dB per trip around its loop, which
//! makes every channel fall by 60 dB in `t60` seconds regardless of its
//! length. All gains are below one and `Q` is orthogonal, so the loop gain is
//! below one and the network is stable. Construction checks that numerically
//! before any audio runs.

use crate::{
    dsp::{delay::DelayLine, math::dbtoa, matrix::Matrix, noise::Rng},
    error::{check_sample_rate, ConfigError},
    params::ReverbParams,
};

/// Longest delay any channel may use.
pub const MAX_DELAY_SECONDS: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct FdnReverb<const N: usize = 5> {
    lines: [DelayLine; N],
    matrix: [[f32; N]; N],
    matrix_norm: f32,
    delays: [f32; N],
    gains: [f32; N],
    dry: f32,
    sample_rate: f32,
}

impl<const N: usize> FdnReverb<N> {
    pub fn new(params: &ReverbParams, sample_rate: f32) -> Result<Self, ConfigError> {
        check_sample_rate(sample_rate)?;
        params.validate(sample_rate)?;
        if N == 0 || N > params.delays_ms.len() {
            return Err(ConfigError::InvalidParameter {
                name: "channels",
                value: N as f32,
            });
        }

        let mut rng = Rng::new_with_seed(params.seed);
        let q = Matrix::from_fn(N, N, |_, _| rng.normal() * 0.1).orthonormalize()?;
        let matrix_norm = q.operator_norm()?;

        let line = DelayLine::with_duration(MAX_DELAY_SECONDS, sample_rate)?;
        let mut reverb = Self {
            lines: std::array::from_fn(|_| line.clone()),
            matrix: std::array::from_fn(|i| std::array::from_fn(|j| q.get(i, j))),
            matrix_norm,
            delays: [0.0; N],
            gains: [0.0; N],
            dry: 0.0,
            sample_rate,
        };
        reverb.set(params)?;
        log::debug!(
            "{N}-channel reverb at {sample_rate} Hz, t60 {}s, loop gain {}",
            params.decay_time,
            reverb.loop_gain()
        );
        Ok(reverb)
    }

    /// Update delays, decay and dry level. The mixing matrix keeps the seed
    /// it was built with. Nothing changes if the parameters are rejected.
    pub fn set(&mut self, params: &ReverbParams) -> Result<(), ConfigError> {
        params.validate(self.sample_rate)?;

        let mut delays = [0.0; N];
        let mut gains = [0.0; N];
        for i in 0..N {
            let ms = params.delays_ms[i];
            delays[i] = ms * 0.001 * self.sample_rate;
            self.lines[i].check_delay(delays[i])?;
            gains[i] = dbtoa(-60.0 * ms * 0.001 / params.decay_time);
        }

        let loop_gain = gains.iter().fold(0.0f32, |a, &g| a.max(g)) * self.matrix_norm;
        if loop_gain >= 1.0 {
            return Err(ConfigError::UnstableNetwork { loop_gain });
        }

        self.delays = delays;
        self.gains = gains;
        self.dry = params.dry;
        Ok(())
    }

    /// Upper bound on the energy gain of one trip around the network.
    pub fn loop_gain(&self) -> f32 {
        self.gains.iter().fold(0.0f32, |a, &g| a.max(g)) * self.matrix_norm
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn matrix(&self) -> &[[f32; N]; N] {
        &self.matrix
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut taps = [0.0f32; N];
        let mut wet = 0.0;
        for ((tap, line), delay) in taps.iter_mut().zip(&self.lines).zip(&self.delays) {
            *tap = line.read(*delay);
            wet += *tap;
        }

        for ((line, row), gain) in self.lines.iter_mut().zip(&self.matrix).zip(&self.gains) {
            let mixed: f32 = row.iter().zip(&taps).map(|(q, y)| q * y).sum();
            line.write(mixed * gain + input);
        }

        wet + self.dry * input
    }

    pub fn reset(&mut self) {
        self.lines.iter_mut().for_each(DelayLine::reset);
    }
}
