//! Table-driven trigonometry in Q1.15
//!
//! Sine is evaluated by linear interpolation in [`SIN_TABLE_Q15`]; cosine
//! reuses the same path after shifting the phase by a quarter cycle,
//! `cos(x) = sin(x + pi/2)`.
//!
//! The phase is a Q1.15 value where `[0, 0x7FFF]` spans one full cycle
//! `[0, 2*pi)`. Negative phases are folded back into that range, so both
//! functions are total over `i16`.
//!
//! Results are truncated, not rounded, at every renormalisation step. The
//! worst-case error against `f64` sine is below 5 LSB.
//!
//! # Example
//!
//! ```
//! use qdsp::fast_math::{cos_q15, sin_q15};
//!
//! assert_eq!(sin_q15(0x2000), 32766); // sin(pi/2)
//! assert_eq!(cos_q15(0), 32766);      // cos(0)
//! assert_eq!(sin_q15(0x6000), -32768); // sin(3*pi/2)
//! ```

use crate::fixed::{QFormat, Q15};
use crate::tables::{FAST_MATH_Q15_SHIFT, SIN_TABLE_Q15};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A quarter cycle (pi/2) in Q1.15 phase units
pub const QUARTER_CYCLE_Q15: u16 = 0x2000;

/// A full cycle (2*pi) in Q1.15 phase units
pub const FULL_CYCLE_Q15: u16 = 0x8000;

/// Bits the intra-interval offset is shifted left to become a Q1.15 fraction
const FRACT_SHIFT: u32 = 15 - FAST_MATH_Q15_SHIFT;

/// Sine of a Q1.15 phase
///
/// `x` in `[0, 0x7FFF]` maps to `[0, 2*pi)`. Negative inputs are taken
/// modulo a full cycle.
#[inline]
pub fn sin_q15(x: Q15) -> Q15 {
    interpolate(fold_phase(x))
}

/// Cosine of a Q1.15 phase, computed as the sine of `x` plus a quarter cycle
///
/// ```
/// use qdsp::fast_math::{cos_q15, sin_q15};
///
/// let x = 0x1234;
/// assert_eq!(cos_q15(x), sin_q15(x + 0x2000));
/// ```
#[inline]
pub fn cos_q15(x: Q15) -> Q15 {
    let shifted = (x as u16).wrapping_add(QUARTER_CYCLE_Q15) as i16;
    sin_q15(shifted)
}

/// Evaluates [`sin_q15`] for every sample of `src`
///
/// # Panics
///
/// Panics if `dst` is shorter than `src`.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(len = src.len())))]
pub fn sin_q15_slice(src: &[Q15], dst: &mut [Q15]) {
    for (out, &x) in dst[..src.len()].iter_mut().zip(src) {
        *out = sin_q15(x);
    }
}

/// Evaluates [`cos_q15`] for every sample of `src`
///
/// # Panics
///
/// Panics if `dst` is shorter than `src`.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(len = src.len())))]
pub fn cos_q15_slice(src: &[Q15], dst: &mut [Q15]) {
    for (out, &x) in dst[..src.len()].iter_mut().zip(src) {
        *out = cos_q15(x);
    }
}

/// Converts an angle in radians to a Q1.15 phase, wrapping modulo `2*pi`
///
/// ```
/// use qdsp::fast_math::phase_from_radians;
///
/// assert_eq!(phase_from_radians(std::f64::consts::FRAC_PI_2), 0x2000);
/// assert_eq!(phase_from_radians(-std::f64::consts::FRAC_PI_2), 0x6000);
/// ```
pub fn phase_from_radians(radians: f64) -> Q15 {
    let turns = radians / (2.0 * std::f64::consts::PI);
    let raw = QFormat::Q15.from_f64(turns.rem_euclid(1.0)) as i16;
    fold_phase(raw)
}

/// Maps a negative phase onto `[0, 0x7FFF]` by adding one full cycle
#[inline]
fn fold_phase(x: Q15) -> Q15 {
    if x < 0 {
        (x as u16).wrapping_add(FULL_CYCLE_Q15) as i16
    } else {
        x
    }
}

/// Linear interpolation in the sine table for a phase in `[0, 0x7FFF]`
#[inline]
fn interpolate(x: Q15) -> Q15 {
    debug_assert!(x >= 0);

    let index = ((x as u16) >> FAST_MATH_Q15_SHIFT) as usize;
    let fract = ((x as i32 - ((index as i32) << FAST_MATH_Q15_SHIFT)) << FRACT_SHIFT) as i16;

    // index <= 511, so index + 1 lands at worst on the wrap sample
    let a = SIN_TABLE_Q15[index] as i32;
    let b = SIN_TABLE_Q15[index + 1] as i32;

    let low = (((0x8000 - fract as i32) * a) >> 16) as i16;
    let blended = (((low as i32) << 16).wrapping_add(fract as i32 * b) >> 16) as i16;

    // both >> 16 steps halve the table gain
    blended.wrapping_shl(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::q15_to_f64;
    use crate::tables::FAST_MATH_TABLE_SIZE;
    use std::f64::consts::PI;

    fn reference_sin(x: Q15) -> f64 {
        let phase = (x as i32).rem_euclid(0x8000) as f64 / 32768.0;
        (2.0 * PI * phase).sin()
    }

    #[test]
    fn test_sin_known_values() {
        assert_eq!(sin_q15(0), 0);
        assert_eq!(sin_q15(0x1000), 23170);
        assert_eq!(sin_q15(0x2000), 32766);
        assert_eq!(sin_q15(0x4000), 0);
        assert_eq!(sin_q15(0x6000), -32768);
        assert_eq!(sin_q15(1), 6);
    }

    #[test]
    fn test_cos_known_values() {
        assert_eq!(cos_q15(0), 32766);
        assert_eq!(cos_q15(0x1000), 23170);
        assert_eq!(cos_q15(0x2000), 0);
        assert_eq!(cos_q15(0x4000), -32768);
        assert_eq!(cos_q15(0x6000), 0);
    }

    #[test]
    fn test_negative_phase_folds() {
        assert_eq!(sin_q15(-1), sin_q15(0x7FFF));
        assert_eq!(sin_q15(i16::MIN), sin_q15(0));
        assert_eq!(cos_q15(-1), cos_q15(0x7FFF));
    }

    #[test]
    fn test_last_interval_uses_wrap_sample() {
        // phase 0x7FFF sits in interval 511, blending table[511] with table[512]
        let x: Q15 = 0x7FFF;
        let index = ((x as u16) >> FAST_MATH_Q15_SHIFT) as usize;
        assert_eq!(index, FAST_MATH_TABLE_SIZE - 1);
        assert_eq!(SIN_TABLE_Q15[index + 1], SIN_TABLE_Q15[0]);
        assert_eq!(sin_q15(x), -8);
    }

    #[test]
    fn test_exhaustive_accuracy() {
        let lsb = 1.0 / 32768.0;
        for x in i16::MIN..=i16::MAX {
            let err = (q15_to_f64(sin_q15(x)) - reference_sin(x)).abs();
            assert!(err < 5.0 * lsb, "sin_q15({}) error {} LSB", x, err / lsb);
        }
    }

    #[test]
    fn test_exhaustive_phase_shift_identity() {
        for x in i16::MIN..=i16::MAX {
            let shifted = (x as u16).wrapping_add(QUARTER_CYCLE_Q15) as i16;
            assert_eq!(cos_q15(x), sin_q15(shifted), "x = {}", x);
        }
    }

    #[test]
    fn test_slices() {
        let src = [0i16, 0x2000, 0x4000, 0x6000];
        let mut sin = [0i16; 4];
        let mut cos = [0i16; 4];
        sin_q15_slice(&src, &mut sin);
        cos_q15_slice(&src, &mut cos);
        assert_eq!(sin, [0, 32766, 0, -32768]);
        assert_eq!(cos, [32766, 0, -32768, 0]);
    }

    #[test]
    fn test_phase_from_radians() {
        assert_eq!(phase_from_radians(0.0), 0);
        assert_eq!(phase_from_radians(PI), 0x4000);
        assert_eq!(phase_from_radians(2.0 * PI), 0);
        assert_eq!(phase_from_radians(-PI / 2.0), 0x6000);
        assert_eq!(phase_from_radians(5.0 * PI / 2.0), 0x2000);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_cos_periodic(x in any::<i16>()) {
                let next_cycle = (x as u16).wrapping_add(FULL_CYCLE_Q15) as i16;
                prop_assert_eq!(cos_q15(x), cos_q15(next_cycle));
                prop_assert_eq!(sin_q15(x), sin_q15(next_cycle));
            }

            #[test]
            fn test_pythagorean_identity(x in 0i16..=i16::MAX) {
                let s = q15_to_f64(sin_q15(x));
                let c = q15_to_f64(cos_q15(x));
                prop_assert!((s * s + c * c - 1.0).abs() < 1e-3);
            }
        }
    }
}
