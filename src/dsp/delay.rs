//! Circular delay line with fractional reads.

/*
Delay Line
==========

A fixed ring of samples plus a write cursor. `write` stores at the cursor
and advances it by one slot. `read(d)` looks `d` samples back from the most
recent write:

    write(a); write(b); write(c);
    read(1) == c      read(2) == b      read(3) == a
    read(2.5) == (b + a) / 2

`read(0)` points at the slot the next write will overwrite, i.e. the oldest
sample in the ring. Reads up to the capacity are exact; anything further
back silently wraps onto newer data, so size the line for the longest delay
you will ask for (`check_delay` validates that up front).
*/

use crate::{
    dsp::buffer::InterpolatedBuffer,
    error::{check_sample_rate, ConfigError},
};

#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: InterpolatedBuffer,
    index: usize,
}

impl DelayLine {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            buffer: InterpolatedBuffer::new(capacity)?,
            index: 0,
        })
    }

    /// Line long enough to hold `seconds` of audio at `sample_rate`.
    pub fn with_duration(seconds: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        check_sample_rate(sample_rate)?;
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "seconds",
                value: seconds,
            });
        }
        Self::new((seconds * sample_rate).ceil() as usize)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Fails if `samples_ago` cannot be read back exactly.
    pub fn check_delay(&self, samples_ago: f32) -> Result<(), ConfigError> {
        if !samples_ago.is_finite() || samples_ago < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "delay",
                value: samples_ago,
            });
        }
        if samples_ago > self.capacity() as f32 {
            return Err(ConfigError::DelayTooLong {
                requested: samples_ago,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer.store(self.index, sample);
        self.index += 1;
        if self.index == self.buffer.len() {
            self.index = 0;
        }
    }

    /// Sample written `samples_ago` writes back, interpolating fractional
    /// positions.
    #[inline]
    pub fn read(&self, samples_ago: f32) -> f32 {
        let mut read_index = self.index as f32 - samples_ago;
        if read_index < 0.0 {
            read_index += self.buffer.len() as f32;
        }
        self.buffer.lookup(read_index)
    }

    /// Read `delay_samples` back, then write `sample`. With a delay of `d`
    /// the input reappears `d` calls later.
    #[inline]
    pub fn next_sample(&mut self, sample: f32, delay_samples: f32) -> f32 {
        let delayed = self.read(delay_samples);
        self.write(sample);
        delayed
    }

    pub fn render(&mut self, buffer: &mut [f32], delay_samples: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, delay_samples);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_after_single_write() {
        let mut delay = DelayLine::new(16).unwrap();
        delay.write(0.5);
        assert_eq!(delay.read(1.0), 0.5);
        // The cursor has already moved past the new sample
        assert_ne!(delay.read(0.0), 0.5);
    }

    #[test]
    fn test_exact_integer_round_trip() {
        let capacity = 64;
        for d in 1..=capacity {
            let mut delay = DelayLine::new(capacity).unwrap();
            // Some history first so the cursor is not at zero
            for i in 0..37 {
                delay.write(i as f32 * 0.01);
            }
            delay.write(0.777);
            for _ in 1..d {
                delay.write(-0.25);
            }
            assert_eq!(delay.read(d as f32), 0.777, "delay {d}");
        }
    }

    #[test]
    fn test_fractional_read_interpolates() {
        let mut delay = DelayLine::new(8).unwrap();
        delay.write(1.0);
        delay.write(2.0);
        delay.write(3.0);
        assert!((delay.read(1.5) - 2.5).abs() < 1e-6);
        assert!((delay.read(2.25) - 1.75).abs() < 1e-6);
    }

    #[test]
    fn test_read_wraps_across_boundary() {
        let mut delay = DelayLine::new(4).unwrap();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            delay.write(v);
        }
        assert_eq!(delay.read(1.0), 5.0);
        assert_eq!(delay.read(2.0), 4.0);
        assert_eq!(delay.read(4.0), 2.0);
        assert!((delay.read(1.5) - 4.5).abs() < 1e-6);
    }

    #[test]
    fn test_next_sample_delays_input() {
        let mut delay = DelayLine::new(32).unwrap();
        let mut buffer = [0.0f32; 16];
        buffer[0] = 1.0;
        delay.render(&mut buffer, 5.0);
        assert_eq!(buffer[5], 1.0);
        assert_eq!(buffer.iter().filter(|s| **s != 0.0).count(), 1);
    }

    #[test]
    fn test_check_delay() {
        let delay = DelayLine::with_duration(1.0, 48_000.0).unwrap();
        assert_eq!(delay.capacity(), 48_000);
        assert!(delay.check_delay(48_000.0).is_ok());
        assert!(matches!(
            delay.check_delay(48_000.5),
            Err(ConfigError::DelayTooLong { capacity: 48_000, .. })
        ));
        assert!(delay.check_delay(-1.0).is_err());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut delay = DelayLine::new(8).unwrap();
        delay.write(1.0);
        delay.reset();
        for d in 0..8 {
            assert_eq!(delay.read(d as f32), 0.0);
        }
    }
}
