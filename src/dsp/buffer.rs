//! Fixed-capacity sample storage with wrap-around fractional lookup.
//!
//! This is the backing store for both the delay line and the wavetable. The
//! capacity is chosen once; nothing here reallocates after construction.

use crate::{dsp::math::lerp, error::ConfigError};

#[derive(Debug, Clone)]
pub struct InterpolatedBuffer {
    samples: Box<[f32]>,
}

impl InterpolatedBuffer {
    /// Zero-filled buffer of `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < 2 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(Self {
            samples: vec![0.0; capacity].into_boxed_slice(),
        })
    }

    /// Buffer whose slot `i` holds `f(i)`.
    pub fn from_fn(capacity: usize, f: impl FnMut(usize) -> f32) -> Result<Self, ConfigError> {
        if capacity < 2 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(Self {
            samples: (0..capacity).map(f).collect(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; construction rejects empty buffers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Linear interpolation between slot `floor(index)` and the slot after it,
    /// both taken modulo the capacity.
    #[inline]
    pub fn lookup(&self, index: f32) -> f32 {
        let len = self.samples.len();
        let floor = index.floor();
        let frac = index - floor;
        let left = (floor as i64).rem_euclid(len as i64) as usize;
        let right = if left + 1 == len { 0 } else { left + 1 };
        lerp(self.samples[left], self.samples[right], frac)
    }

    /// Lookup at a normalized position `t` in `[0, 1)`.
    #[inline]
    pub fn phasor(&self, t: f32) -> f32 {
        self.lookup(self.samples.len() as f32 * t)
    }

    #[inline]
    pub(crate) fn store(&mut self, index: usize, sample: f32) {
        self.samples[index] = sample;
    }

    pub(crate) fn clear(&mut self) {
        self.samples.fill(0.0);
    }
}
