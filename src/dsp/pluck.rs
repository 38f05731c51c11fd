//! Karplus-Strong plucked string.

/*
Plucked String
==============

A burst of noise circulates through a short delay loop. Each trip around
the loop passes through a two-sample average (which darkens the tone, high
partials first) and a fixed gain (which sets the overall decay). What comes
out is a pitched, decaying, string-like tone.

    noise ──→ ┌────────────────────┐
              │ delay (sr / f)     │ ──→ average ──→ × gain ──┬──→ output
              └────────────────────┘                          │
                        ↑                                     │
                        └─────────────────────────────────────┘

Decay
-----

The loop gain is applied once per period, i.e. n = floor(t60 · f) times in
t60 seconds. For the string to fall by 60 dB over t60:

    gain^n = 10^(-60/20)    →    gain = 0.001^(1/n)

Pitch comes from the delay length, so the loop is sized by the lowest note
the voice will play. The sample rate used for the delay length and the
excitation length is the one the string was built with.
*/

use crate::{
    dsp::{delay::DelayLine, filter::Average, math::dbtoa, noise::Rng},
    error::{check_frequency, check_positive, check_sample_rate, ConfigError},
};

#[derive(Debug, Clone)]
pub struct PluckedString {
    delay: DelayLine,
    filter: Average,
    sample_rate: f32,
    delay_time: f32,
    delay_samples: f32,
    t60: f32,
    gain: f32,
}

impl PluckedString {
    /// String able to play down to `lowest_frequency`.
    pub fn new(lowest_frequency: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        check_frequency(lowest_frequency, sample_rate)?;
        check_positive("lowest_frequency", lowest_frequency)?;
        let capacity = (sample_rate / lowest_frequency).ceil() as usize + 2;
        log::debug!("string loop of {capacity} samples for {lowest_frequency} Hz");
        Self::with_capacity(capacity, sample_rate)
    }

    pub fn with_capacity(capacity: usize, sample_rate: f32) -> Result<Self, ConfigError> {
        check_sample_rate(sample_rate)?;
        Ok(Self {
            delay: DelayLine::new(capacity)?,
            filter: Average::default(),
            sample_rate,
            delay_time: 0.0,
            delay_samples: 0.0,
            t60: 0.0,
            gain: 0.0,
        })
    }

    /// Replace the loop with a silent one of `capacity` samples. Pitch and
    /// decay settings are kept if they still fit.
    pub fn resize(&mut self, capacity: usize) -> Result<(), ConfigError> {
        let delay = DelayLine::new(capacity)?;
        delay.check_delay(self.delay_samples.ceil())?;
        self.delay = delay;
        self.filter.reset();
        Ok(())
    }

    /// Set pitch and the time to decay by 60 dB.
    pub fn set(&mut self, frequency: f32, decay_time: f32) -> Result<(), ConfigError> {
        check_frequency(frequency, self.sample_rate)?;
        check_positive("frequency", frequency)?;
        check_positive("decay_time", decay_time)?;

        let delay_samples = self.sample_rate / frequency;
        self.delay.check_delay(delay_samples.ceil())?;

        // t60 / period, written as t60 · f to keep integer products exact
        let loops = (decay_time * frequency).floor();
        if loops < 1.0 {
            log::warn!("decay time {decay_time}s is shorter than one period at {frequency} Hz");
        }
        let n = loops.max(1.0);

        self.delay_time = 1.0 / frequency;
        self.delay_samples = delay_samples;
        self.t60 = decay_time;
        self.gain = dbtoa(-60.0).powf(1.0 / n);
        Ok(())
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    #[inline]
    pub fn gain(&self) -> f32 {
        self.gain
    }

    #[inline]
    pub fn t60(&self) -> f32 {
        self.t60
    }

    /// Period in seconds.
    #[inline]
    pub fn delay_time(&self) -> f32 {
        self.delay_time
    }

    /// Samples the excitation burst covers.
    #[inline]
    pub fn excitation_length(&self) -> usize {
        self.delay_samples.ceil() as usize
    }

    /// Re-excite the string with uniform noise in `[-gain, gain)`. Safe to
    /// call while the string is still ringing.
    pub fn pluck(&mut self, gain: f32, rng: &mut Rng) {
        for _ in 0..self.excitation_length() {
            self.delay.write(rng.bipolar() * gain);
        }
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        let delayed = self.delay.read(self.delay_samples);
        let output = self.filter.process(delayed) * self.gain;
        self.delay.write(output);
        output
    }

    pub fn reset(&mut self) {
        self.delay.reset();
        self.filter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48_000.0;

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn test_gain_reaches_minus_sixty_db() {
        let mut string = PluckedString::new(50.0, SR).unwrap();
        string.set(320.0, 0.75).unwrap();
        // 0.75 s * 320 Hz = 240 trips around the loop
        let total = string.gain().powi(240);
        assert!((total - 0.001).abs() < 1e-5, "got {total}");
    }

    #[test]
    fn test_pluck_fills_one_period() {
        let mut string = PluckedString::with_capacity(1_000, SR).unwrap();
        string.set(480.0, 1.0).unwrap();
        assert_eq!(string.excitation_length(), 100);

        let mut rng = Rng::new_with_seed(9);
        string.pluck(1.0, &mut rng);
        for k in 1..=100 {
            assert_ne!(string.delay.read(k as f32), 0.0, "slot {k} ago is silent");
        }
        assert_eq!(string.delay.read(101.0), 0.0);
    }

    #[test]
    fn test_silent_until_plucked() {
        let mut string = PluckedString::new(100.0, SR).unwrap();
        string.set(220.0, 1.0).unwrap();
        assert!((0..1_000).all(|_| string.process() == 0.0));
    }

    #[test]
    fn test_output_decays_and_stays_finite() {
        let mut string = PluckedString::new(100.0, SR).unwrap();
        string.set(220.0, 0.5).unwrap();
        string.pluck(1.0, &mut Rng::new_with_seed(1));

        let samples: Vec<f32> = (0..SR as usize).map(|_| string.process()).collect();
        assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
        let early = rms(&samples[..4_800]);
        let late = rms(&samples[43_200..]);
        assert!(late < early * 0.01, "early {early}, late {late}");
    }

    #[test]
    fn test_repluck_while_ringing() {
        let mut string = PluckedString::new(100.0, SR).unwrap();
        string.set(330.0, 0.3).unwrap();
        let mut rng = Rng::new_with_seed(4);
        string.pluck(1.0, &mut rng);
        for _ in 0..24_000 {
            string.process();
        }
        let before: Vec<f32> = (0..480).map(|_| string.process()).collect();
        string.pluck(1.0, &mut rng);
        let after: Vec<f32> = (0..480).map(|_| string.process()).collect();
        assert!(rms(&after) > rms(&before) * 10.0);
    }

    #[test]
    fn test_rejects_pitch_below_capacity() {
        let mut string = PluckedString::new(200.0, SR).unwrap();
        assert!(matches!(
            string.set(100.0, 1.0),
            Err(ConfigError::DelayTooLong { .. })
        ));
        assert!(string.set(200.0, 1.0).is_ok());
        assert!(string.set(200.0, 0.0).is_err());
    }

    #[test]
    fn test_resize_keeps_settings_that_fit() {
        let mut string = PluckedString::with_capacity(48_000, SR).unwrap();
        string.set(300.0, 0.7).unwrap();
        assert!(string.resize(100).is_err());
        assert!(string.resize(1_000).is_ok());
        assert!((string.delay_time() - 1.0 / 300.0).abs() < 1e-7);
    }
}
