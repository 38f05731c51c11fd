//! Stateless numeric helpers shared by every primitive.

/*
Units and Conversions
=====================

  MIDI note     Semitone number. 69 is A4 (440 Hz), 60 is middle C.
                Note 0 sits at 8.175799 Hz, so

                    f = 8.175799 * 2^(m / 12) = 440 * 2^((m - 69) / 12)

  decibels      Logarithmic amplitude. Each 20 dB is a factor of 10:

                     0 dB  = 1.0
                    -6 dB  ≈ 0.5
                   -20 dB  = 0.1
                   -60 dB  = 0.001   (the "t60" threshold)

  phase         Position inside one period, kept in [0, 1).


Wrapping
--------

Phase accumulators drift past the end of their range by at most one
increment per sample, so a single subtraction is almost always enough.
Anything further out (a large jump, a denormal edge) falls back to a
Euclidean remainder, which handles both signs without a loop.
*/

/// Affine remap of `value` from `[low, high]` onto `[out_low, out_high]`.
#[inline]
pub fn map(value: f32, low: f32, high: f32, out_low: f32, out_high: f32) -> f32 {
    out_low + (out_high - out_low) * ((value - low) / (high - low))
}

/// Linear blend: `t = 0` gives `a`, `t = 1` gives `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Frequency of MIDI note 0.
const MIDI_NOTE_ZERO_HZ: f32 = 8.175_799;

/// MIDI note number (fractional allowed) to frequency in Hz.
#[inline]
pub fn mtof(note: f32) -> f32 {
    MIDI_NOTE_ZERO_HZ * (note / 12.0).exp2()
}

/// Frequency in Hz to (fractional) MIDI note number.
#[inline]
pub fn ftom(frequency: f32) -> f32 {
    12.0 * (frequency / MIDI_NOTE_ZERO_HZ).log2()
}

/// Decibels to linear amplitude.
#[inline]
pub fn dbtoa(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Linear amplitude to decibels. Zero maps to negative infinity.
#[inline]
pub fn atodb(amplitude: f32) -> f32 {
    20.0 * amplitude.log10()
}

/// Bipolar logistic curve, bounded to (-1, 1). Used as a soft limiter.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    2.0 / (1.0 + (-x).exp()) - 1.0
}

/// Reduce `value` into `[low, high)`.
///
/// `high > low` is a configuration precondition and is only checked in debug
/// builds.
#[inline]
pub fn wrap(value: f32, low: f32, high: f32) -> f32 {
    debug_assert!(high > low, "wrap range is empty: [{low}, {high})");
    let range = high - low;
    let mut v = value;
    if v >= high {
        v -= range;
        if v >= high {
            v = low + (v - low).rem_euclid(range);
        }
    } else if v < low {
        v += range;
        if v < low {
            v = low + (v - low).rem_euclid(range);
        }
    }
    // Rounding can land exactly on the open end.
    if v >= high {
        v = low;
    }
    v
}

/// Wrap into the unit interval `[0, 1)`.
#[inline]
pub fn wrap_unit(value: f32) -> f32 {
    wrap(value, 0.0, 1.0)
}
