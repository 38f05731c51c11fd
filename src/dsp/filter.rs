use std::f32::consts::TAU;

use crate::error::{check_frequency, check_positive, check_sample_rate, ConfigError};

/*
| type           | difference equation                         | role                 |
| -------------- | ------------------------------------------- | -------------------- |
| History        | y[n] = x[n-1]                               | one-sample delay     |
| Delta          | y[n] = x[n] - x[n-1]                        | backward difference  |
| Average        | y[n] = (x[n] + x[n-1]) / 2                  | string loop damping  |
| OnePole        | y[n] = b0 x[n] + a1 y[n-1],  b0 = 1 - a1    | smoothing low-pass   |
| SlewRateLimit  | v += clamp(x - v, ±rate/sr), y[n] = v[n-1]  | rate-bounded follow  |
*/

/// One-sample delay: each call returns the previous input.
#[derive(Debug, Clone, Default)]
pub struct History {
    previous: f32,
}

impl History {
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        std::mem::replace(&mut self.previous, input)
    }

    /// Last stored input, without advancing.
    #[inline]
    pub fn peek(&self) -> f32 {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = 0.0;
    }
}

/// Backward difference.
#[derive(Debug, Clone, Default)]
pub struct Delta {
    history: History,
}

impl Delta {
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        input - self.history.process(input)
    }

    pub fn reset(&mut self) {
        self.history.reset();
    }
}

/// Two-sample moving average. Unity gain at DC, a zero at Nyquist.
#[derive(Debug, Clone, Default)]
pub struct Average {
    history: History,
}

impl Average {
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        (input + self.history.process(input)) * 0.5
    }

    pub fn reset(&mut self) {
        self.history.reset();
    }
}

/// Single-pole recursive low-pass with unity DC gain.
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    a1: f32,
    b0: f32,
    previous_output: f32,
}

impl OnePole {
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        let mut filter = Self::default();
        filter.frequency(cutoff_hz, sample_rate)?;
        Ok(filter)
    }

    pub fn frequency(&mut self, cutoff_hz: f32, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(cutoff_hz, sample_rate)?;
        self.a1 = (-TAU * cutoff_hz / sample_rate).exp();
        self.b0 = 1.0 - self.a1;
        Ok(())
    }

    /// Feedback coefficient; the per-sample decay of the error toward a step.
    #[inline]
    pub fn pole(&self) -> f32 {
        self.a1
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.previous_output = self.b0 * input + self.a1 * self.previous_output;
        self.previous_output
    }

    pub fn reset(&mut self) {
        self.previous_output = 0.0;
    }
}

/// Bounds how far the output may move per sample.
///
/// Output is delayed by one sample: each call returns the value held before
/// this input was applied.
#[derive(Debug, Clone, Default)]
pub struct SlewRateLimit {
    value: f32,
    limit: f32,
}

impl SlewRateLimit {
    pub fn new(initial: f32, rate: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        let mut limiter = Self::default();
        limiter.configure(initial, rate, sample_rate)?;
        Ok(limiter)
    }

    /// `rate` is the largest change allowed per second.
    pub fn configure(&mut self, initial: f32, rate: f32, sample_rate: f32) -> Result<(), ConfigError> {
        check_sample_rate(sample_rate)?;
        check_positive("rate", rate)?;
        self.value = initial;
        self.set_rate(rate, sample_rate)
    }

    /// Change the rate without disturbing the held value.
    pub fn set_rate(&mut self, rate: f32, sample_rate: f32) -> Result<(), ConfigError> {
        check_sample_rate(sample_rate)?;
        check_positive("rate", rate)?;
        self.limit = rate / sample_rate;
        Ok(())
    }

    /// Largest change applied per sample.
    #[inline]
    pub fn limit(&self) -> f32 {
        self.limit
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.value;
        self.value += (input - self.value).clamp(-self.limit, self.limit);
        output
    }
}
