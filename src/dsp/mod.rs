//! Low-level DSP primitives.
//!
//! Every unit here sizes its buffers when it is built or configured and then
//! processes samples without allocating, locking, or failing. Validation
//! happens up front and returns [`ConfigError`](crate::ConfigError).

/// Fixed-capacity buffer with linear-interpolated reads.
pub mod buffer;
/// Circular delay line.
pub mod delay;
/// One-sample building blocks, one-pole low-pass and slew limiter.
pub mod filter;
pub mod math;
/// Dense matrices for building and checking the reverb mixing matrix.
pub mod matrix;
/// Seeded random numbers and white noise.
pub mod noise;
/// Phasor, shared-wavetable sine and quasi-bandlimited sawtooth.
pub mod oscillator;
/// Karplus-Strong plucked string.
pub mod pluck;
/// Feedback delay network reverberator.
pub mod reverb;
pub mod sine;

pub use delay::DelayLine;
pub use filter::{Average, Delta, History, OnePole, SlewRateLimit};
pub use noise::{Noise, Rng};
pub use oscillator::{Cycle, Phasor, QuasiSaw, Wavetable};
pub use pluck::PluckedString;
pub use reverb::FdnReverb;
