//! Configuration-time errors.
//!
//! Every fallible check in this crate happens when a unit is built or
//! reconfigured. Per-sample processing never returns an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),

    #[error("frequency {frequency} Hz is at or above the Nyquist frequency {nyquist} Hz")]
    AboveNyquist { frequency: f32, nyquist: f32 },

    #[error("range is empty or inverted: low {low}, high {high}")]
    InvalidRange { low: f32, high: f32 },

    #[error("requested delay of {requested} samples does not fit in capacity {capacity}")]
    DelayTooLong { requested: f32, capacity: usize },

    #[error("buffer capacity must be at least two samples")]
    InvalidCapacity,

    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("matrices cannot be empty")]
    EmptyMatrix,

    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("matrix rows are linearly dependent")]
    SingularMatrix,

    #[error("incompatible dimensions: {left:?} x {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("feedback network is unstable: loop gain {loop_gain}")]
    UnstableNetwork { loop_gain: f32 },
}

/// Reject sample rates that are zero, negative, or not finite.
pub(crate) fn check_sample_rate(sample_rate: f32) -> Result<(), ConfigError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSampleRate(sample_rate))
    }
}

/// Reject frequencies that are negative, not finite, or at/above Nyquist.
pub(crate) fn check_frequency(frequency: f32, sample_rate: f32) -> Result<(), ConfigError> {
    check_sample_rate(sample_rate)?;
    if !frequency.is_finite() || frequency < 0.0 {
        return Err(ConfigError::InvalidParameter {
            name: "frequency",
            value: frequency,
        });
    }
    let nyquist = sample_rate * 0.5;
    if frequency >= nyquist {
        return Err(ConfigError::AboveNyquist { frequency, nyquist });
    }
    Ok(())
}

/// Reject values that are not finite and strictly positive.
pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
