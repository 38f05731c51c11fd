//! Plain parameter descriptors for every configurable unit.
//!
//! Each descriptor is `Copy`, so a UI thread can hand it to the audio thread
//! through [`control`](crate::control) without allocating or freeing on
//! either side. `validate` performs every check the matching
//! [`Configure`] impl would make, so descriptors can be rejected before they
//! are ever sent.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        filter::{OnePole, SlewRateLimit},
        oscillator::{Cycle, Phasor, QuasiSaw},
        pluck::PluckedString,
        reverb::{FdnReverb, MAX_DELAY_SECONDS},
    },
    error::{check_frequency, check_positive, check_sample_rate, ConfigError},
};

/// Apply a parameter descriptor to a unit.
///
/// On error the unit is left exactly as it was.
pub trait Configure<P> {
    fn configure(&mut self, params: &P, sample_rate: f32) -> Result<(), ConfigError>;
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasorParams {
    pub frequency: f32,
    /// Fraction of a period added to the output phase.
    pub offset: f32,
}

impl Default for PhasorParams {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            offset: 0.0,
        }
    }
}

impl PhasorParams {
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(self.frequency, sample_rate)?;
        check_finite("offset", self.offset)
    }
}

impl Configure<PhasorParams> for Phasor {
    fn configure(&mut self, params: &PhasorParams, sample_rate: f32) -> Result<(), ConfigError> {
        params.validate(sample_rate)?;
        self.frequency(params.frequency, sample_rate)?;
        self.set_offset(params.offset);
        Ok(())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleParams {
    pub frequency: f32,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self { frequency: 440.0 }
    }
}

impl CycleParams {
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(self.frequency, sample_rate)
    }
}

impl Configure<CycleParams> for Cycle {
    fn configure(&mut self, params: &CycleParams, sample_rate: f32) -> Result<(), ConfigError> {
        self.frequency(params.frequency, sample_rate)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuasiSawParams {
    pub frequency: f32,
    /// Brightness blend in `[0, 1]`.
    pub virtual_filter: f32,
}

impl Default for QuasiSawParams {
    fn default() -> Self {
        Self {
            frequency: 220.0,
            virtual_filter: 1.0,
        }
    }
}

impl QuasiSawParams {
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(self.frequency, sample_rate)?;
        if !(0.0..=1.0).contains(&self.virtual_filter) {
            return Err(ConfigError::InvalidParameter {
                name: "virtual_filter",
                value: self.virtual_filter,
            });
        }
        Ok(())
    }
}

impl Configure<QuasiSawParams> for QuasiSaw {
    fn configure(&mut self, params: &QuasiSawParams, sample_rate: f32) -> Result<(), ConfigError> {
        params.validate(sample_rate)?;
        self.frequency(params.frequency, sample_rate)?;
        self.virtual_filter(params.virtual_filter);
        Ok(())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePoleParams {
    pub cutoff: f32,
}

impl Default for OnePoleParams {
    fn default() -> Self {
        Self { cutoff: 1_000.0 }
    }
}

impl OnePoleParams {
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(self.cutoff, sample_rate)
    }
}

impl Configure<OnePoleParams> for OnePole {
    fn configure(&mut self, params: &OnePoleParams, sample_rate: f32) -> Result<(), ConfigError> {
        self.frequency(params.cutoff, sample_rate)
    }
}

/// Slew limit in units per second. Reconfiguring keeps the held value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlewParams {
    pub rate: f32,
}

impl Default for SlewParams {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}

impl SlewParams {
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_sample_rate(sample_rate)?;
        check_positive("rate", self.rate)
    }
}

impl Configure<SlewParams> for SlewRateLimit {
    fn configure(&mut self, params: &SlewParams, sample_rate: f32) -> Result<(), ConfigError> {
        self.set_rate(params.rate, sample_rate)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluckParams {
    pub frequency: f32,
    /// Seconds for the string to fall by 60 dB.
    pub decay_time: f32,
}

impl Default for PluckParams {
    fn default() -> Self {
        Self {
            frequency: 220.0,
            decay_time: 1.0,
        }
    }
}

impl PluckParams {
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(self.frequency, sample_rate)?;
        check_positive("frequency", self.frequency)?;
        check_positive("decay_time", self.decay_time)
    }
}

/// The string keeps the sample rate it was built with; a different
/// `sample_rate` here is rejected.
impl Configure<PluckParams> for PluckedString {
    fn configure(&mut self, params: &PluckParams, sample_rate: f32) -> Result<(), ConfigError> {
        params.validate(sample_rate)?;
        if sample_rate != self.sample_rate() {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }
        self.set(params.frequency, params.decay_time)
    }
}

pub const MAX_REVERB_CHANNELS: usize = 8;

/// Default per-channel delays. The first five are used by the default
/// five-channel reverb; none is a multiple of another at common rates.
pub const DEFAULT_REVERB_DELAYS_MS: [f32; MAX_REVERB_CHANNELS] =
    [29.7, 37.1, 41.1, 43.7, 50.3, 53.9, 59.3, 67.1];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Per-channel delay in milliseconds. A reverb with `N` channels reads
    /// the first `N` entries.
    pub delays_ms: [f32; MAX_REVERB_CHANNELS],
    /// Seconds for the tail to fall by 60 dB.
    pub decay_time: f32,
    /// Level of the input added straight to the output.
    pub dry: f32,
    /// Seed for the mixing matrix. Only read at construction.
    pub seed: u64,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            delays_ms: DEFAULT_REVERB_DELAYS_MS,
            decay_time: 2.0,
            dry: 0.1,
            seed: 0x5eed,
        }
    }
}

impl ReverbParams {
    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_sample_rate(sample_rate)?;
        check_positive("decay_time", self.decay_time)?;
        check_finite("dry", self.dry)?;
        if self.dry < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "dry",
                value: self.dry,
            });
        }
        for &ms in &self.delays_ms {
            // A delay under one sample would read the slot being overwritten
            if !ms.is_finite() || ms * 0.001 * sample_rate < 1.0 {
                return Err(ConfigError::InvalidParameter {
                    name: "delays_ms",
                    value: ms,
                });
            }
            if ms * 0.001 > MAX_DELAY_SECONDS {
                return Err(ConfigError::DelayTooLong {
                    requested: ms * 0.001 * sample_rate,
                    capacity: (MAX_DELAY_SECONDS * sample_rate).ceil() as usize,
                });
            }
        }
        Ok(())
    }
}

impl<const N: usize> Configure<ReverbParams> for FdnReverb<N> {
    fn configure(&mut self, params: &ReverbParams, sample_rate: f32) -> Result<(), ConfigError> {
        if sample_rate != self.sample_rate() {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }
        self.set(params)
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48_000.0;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PhasorParams::default().validate(SR).is_ok());
        assert!(CycleParams::default().validate(SR).is_ok());
        assert!(QuasiSawParams::default().validate(SR).is_ok());
        assert!(OnePoleParams::default().validate(SR).is_ok());
        assert!(SlewParams::default().validate(SR).is_ok());
        assert!(PluckParams::default().validate(SR).is_ok());
        assert!(ReverbParams::default().validate(SR).is_ok());
    }

    #[test]
    fn test_rejected_params_leave_unit_unchanged() {
        let mut phasor = Phasor::new(1_000.0, SR).unwrap();
        let bad = PhasorParams {
            frequency: 30_000.0,
            offset: 0.0,
        };
        assert!(phasor.configure(&bad, SR).is_err());
        assert!((phasor.increment() - 1_000.0 / SR).abs() < 1e-9);

        let mut saw = QuasiSaw::new(220.0, SR).unwrap();
        let bad = QuasiSawParams {
            frequency: 440.0,
            virtual_filter: 2.0,
        };
        assert!(saw.configure(&bad, SR).is_err());
    }

    #[test]
    fn test_configure_applies_params() {
        let mut phasor = Phasor::default();
        let params = PhasorParams {
            frequency: 4_800.0,
            offset: 0.25,
        };
        phasor.configure(&params, SR).unwrap();
        assert!((phasor.increment() - 0.1).abs() < 1e-7);
        assert!((phasor.process() - 0.25).abs() < 1e-7);

        let mut string = PluckedString::new(50.0, SR).unwrap();
        let params = PluckParams {
            frequency: 320.0,
            decay_time: 0.75,
        };
        string.configure(&params, SR).unwrap();
        assert!((string.gain().powi(240) - 0.001).abs() < 1e-5);
        assert!(string.configure(&params, 44_100.0).is_err());
    }

    #[test]
    fn test_reverb_params_checks() {
        let mut params = ReverbParams::default();
        params.delays_ms[0] = 0.001;
        assert!(matches!(
            params.validate(SR),
            Err(ConfigError::InvalidParameter { name: "delays_ms", .. })
        ));

        let mut params = ReverbParams::default();
        params.delays_ms[7] = 1_200.0;
        assert!(matches!(
            params.validate(SR),
            Err(ConfigError::DelayTooLong { .. })
        ));

        let params = ReverbParams {
            dry: -0.5,
            ..ReverbParams::default()
        };
        assert!(params.validate(SR).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_are_serializable() {
        fn assert_serde<T: Serialize + for<'de> Deserialize<'de>>() {}
        assert_serde::<PhasorParams>();
        assert_serde::<ReverbParams>();
    }
}
