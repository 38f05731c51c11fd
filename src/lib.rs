#[cfg(feature = "rtrb")]
pub mod control; // Lock-free parameter hand-off
pub mod dsp;
pub mod error;
pub mod graph; // Uniform per-sample process capability
pub mod params; // Control-rate parameter descriptors

pub use error::ConfigError;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
/// Entries in the shared single-cycle sine table.
pub const WAVETABLE_SIZE: usize = 4096;
