//! Benchmarks for low-level DSP primitives.

mod delay;
mod filter;
mod oscillator;
mod pluck;
mod reverb;

pub use delay::bench_delay;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use pluck::bench_pluck;
pub use reverb::bench_reverb;
