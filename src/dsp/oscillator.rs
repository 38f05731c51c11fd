//! Phase accumulators and the oscillators built on them.

/*
Oscillators
===========

Every periodic source here starts from the same idea: a phase that ramps
from 0 toward 1 and wraps, advancing by frequency / sample_rate each sample.

  Phasor      the bare ramp in [0, 1). Also a naive (aliasing) sawtooth.
  Cycle       a Phasor reading a shared single-cycle sine table.
  QuasiSaw    a self-modulating sine recursion that approximates a
              bandlimited sawtooth without summing harmonics.

Frequencies are validated when they are set: anything at or above Nyquist
(sample_rate / 2) is a configuration error. Per-sample calls never fail.


Shared Wavetable
----------------

The sine table is 4096 samples of exactly one period. It never changes
after it is filled, so every Cycle holds an `Arc` to the same table:

    let table = Wavetable::shared_sine();   // filled once, on first use
    let a = Cycle::new(table.clone());
    let b = Cycle::new(table);

The process-wide instance is built behind `once_cell::sync::Lazy`, which
runs the fill exactly once even if several threads ask at the same time.
Callers that want full control can build their own `Wavetable` and share
it however they like.


Quasi-Bandlimited Sawtooth
--------------------------

    w        = f / sample_rate
    scaling  = 13 (0.5 - w)^4         feedback depth
    dc       = 0.376 - 0.752 w        offset compensation
    norm     = 1 - 2 w                output level

    phase   += 2w, wrapped into [-1, 1)
    osc      = (osc + sin(π (phase + osc · scaling · t))) / 2
    out      = (2.5 osc - 1.5 osc[n-1] + dc) · norm

The phase runs over a period of 2, so the sine takes a half angle to
complete exactly one cycle per period. The two-tap FIR restores the high
end that the averaging recursion rolls off. `t` (the "virtual filter")
blends from a near-sine at 0 to a full sawtooth at 1. The feedback depth
collapses as w approaches 0.5; keep w well below that.
*/

use std::{f32::consts::PI, sync::Arc};

use once_cell::sync::Lazy;

use crate::{
    dsp::{buffer::InterpolatedBuffer, math::{wrap, wrap_unit}},
    error::{check_frequency, ConfigError},
    WAVETABLE_SIZE,
};

/// Normalized-frequency phase generator in `[0, 1)`.
#[derive(Debug, Clone, Default)]
pub struct Phasor {
    increment: f32,
    offset: f32,
    value: f32,
}

impl Phasor {
    pub fn new(hertz: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        let mut phasor = Self::default();
        phasor.frequency(hertz, sample_rate)?;
        Ok(phasor)
    }

    /// Shift the output by a fixed fraction of a period.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.set_offset(offset);
        self
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = wrap_unit(offset);
    }

    pub fn frequency(&mut self, hertz: f32, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(hertz, sample_rate)?;
        self.increment = hertz / sample_rate;
        Ok(())
    }

    #[inline]
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Current phase, before offset.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Returns the current phase, then advances by one increment.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let output = if self.offset == 0.0 {
            self.value
        } else {
            wrap(self.value + self.offset, 0.0, 1.0)
        };
        self.value = wrap(self.value + self.increment, 0.0, 1.0);
        output
    }
}

/// A read-only table holding exactly one period of a waveform.
#[derive(Debug)]
pub struct Wavetable {
    table: InterpolatedBuffer,
}

static SHARED_SINE: Lazy<Arc<Wavetable>> = Lazy::new(|| {
    log::debug!("filling shared {WAVETABLE_SIZE}-point sine table");
    Arc::new(Wavetable::sine(WAVETABLE_SIZE).expect("WAVETABLE_SIZE is a valid capacity"))
});

impl Wavetable {
    /// One full sine period sampled at `size` points.
    pub fn sine(size: usize) -> Result<Self, ConfigError> {
        let step = std::f64::consts::TAU / size as f64;
        let table = InterpolatedBuffer::from_fn(size, |i| (step * i as f64).sin() as f32)?;
        Ok(Self { table })
    }

    /// The process-wide sine table, filled on first use.
    pub fn shared_sine() -> Arc<Wavetable> {
        Arc::clone(&SHARED_SINE)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Interpolated read at phase `t` in `[0, 1)`.
    #[inline]
    pub fn phasor(&self, t: f32) -> f32 {
        self.table.phasor(t)
    }
}

/// Wavetable oscillator: a [`Phasor`] driving a shared [`Wavetable`].
#[derive(Debug, Clone)]
pub struct Cycle {
    table: Arc<Wavetable>,
    phasor: Phasor,
}

impl Cycle {
    pub fn new(table: Arc<Wavetable>) -> Self {
        Self {
            table,
            phasor: Phasor::default(),
        }
    }

    /// Sine oscillator over the process-wide table.
    pub fn sine() -> Self {
        Self::new(Wavetable::shared_sine())
    }

    pub fn with_frequency(mut self, hertz: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        self.frequency(hertz, sample_rate)?;
        Ok(self)
    }

    pub fn frequency(&mut self, hertz: f32, sample_rate: f32) -> Result<(), ConfigError> {
        self.phasor.frequency(hertz, sample_rate)
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        self.table.phasor(self.phasor.process())
    }
}

const A0: f32 = 2.5;
const A1: f32 = -1.5;

/// Quasi-bandlimited sawtooth.
#[derive(Debug, Clone)]
pub struct QuasiSaw {
    osc: f32,
    phase: f32,
    w: f32,
    scaling: f32,
    dc: f32,
    norm: f32,
    in_hist: f32,
    t: f32,
}

impl Default for QuasiSaw {
    fn default() -> Self {
        Self {
            osc: 0.0,
            phase: 0.0,
            w: 0.0,
            scaling: 0.0,
            dc: 0.0,
            norm: 0.0,
            in_hist: 0.0,
            t: 1.0,
        }
    }
}

impl QuasiSaw {
    pub fn new(hertz: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        let mut saw = Self::default();
        saw.frequency(hertz, sample_rate)?;
        Ok(saw)
    }

    pub fn frequency(&mut self, hertz: f32, sample_rate: f32) -> Result<(), ConfigError> {
        check_frequency(hertz, sample_rate)?;
        let w = hertz / sample_rate;
        if w > 0.25 {
            log::warn!("quasi-saw at {hertz} Hz is above a quarter of {sample_rate} Hz; feedback is nearly gone");
        }
        let n = 0.5 - w;
        self.w = w;
        self.scaling = 13.0 * n * n * n * n;
        self.dc = 0.376 - w * 0.752;
        self.norm = 1.0 - 2.0 * w;
        Ok(())
    }

    /// Brightness blend: 0 is close to a sine, 1 is a full sawtooth.
    pub fn virtual_filter(&mut self, t: f32) {
        self.t = t;
    }

    pub fn reset(&mut self) {
        self.osc = 0.0;
        self.phase = 0.0;
        self.in_hist = 0.0;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        self.phase = wrap(self.phase + 2.0 * self.w, -1.0, 1.0);

        self.osc = (self.osc + (PI * (self.phase + self.osc * self.scaling * self.t)).sin()) * 0.5;

        // High-frequency compensation
        let out = A0 * self.osc + A1 * self.in_hist;
        self.in_hist = self.osc;

        (out + self.dc) * self.norm
    }
}
