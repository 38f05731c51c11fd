//! Polynomial sine for phase inputs.

/*
Fast Sine (sin7)
================

`sin7(x)` approximates sin(2πx) for a phase x in [0, 1) with a single
degree-7 polynomial: no table, no memory traffic, four multiply-adds after
the shift.

The curve is odd about x = 0.5, so the polynomial is written in u = x - 0.5
with odd powers only:

    sin(2πx) = -sin(2πu) ≈ -u (c1 + c3 u² + c5 u⁴ + c7 u⁶)

The coefficients come from a Chebyshev expansion of sin(πv) on [-1, 1]
truncated after T7, rescaled to u = v / 2. The first dropped term bounds
the error at about 2.6e-4 across the whole period.

  x      0     0.25    0.5    0.75    1
  out    0     1       0     -1       0
*/

const C1: f32 = 6.278_554;
const C3: f32 = -41.091_116;
const C5: f32 = 77.909_40;
const C7: f32 = -56.038_47;

/// Sine of one full period over a phase `x` in `[0, 1)`.
#[inline]
pub fn sin7(x: f32) -> f32 {
    let u = x - 0.5;
    let u2 = u * u;
    -u * (C1 + u2 * (C3 + u2 * (C5 + u2 * C7)))
}
