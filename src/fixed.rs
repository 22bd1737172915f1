//! Fixed-point (Q-format) numeric model
//!
//! Every kernel in this crate works on plain two's-complement integers that
//! are interpreted as real numbers scaled by `2^-frac_bits`. A Q1.15 sample is
//! an `i16` covering `[-1.0, 1.0)` with a resolution of `2^-15`.
//!
//! Arithmetic never saturates. A result that does not fit the format wraps
//! around exactly as the underlying integer would, which keeps results
//! bit-identical with existing fixed-point code.
//!
//! # Example
//!
//! ```
//! use qdsp::fixed::QFormat;
//!
//! let half = QFormat::Q15.from_f64(0.5);
//! assert_eq!(half, 0x4000);
//! assert_eq!(QFormat::Q15.mul(half, half), 0x2000);
//!
//! // -1.0 * -1.0 does not fit Q1.15 and wraps back to -1.0
//! assert_eq!(QFormat::Q15.mul(-0x8000, -0x8000), -0x8000);
//! ```

use crate::{DspError, Result};

/// Q1.15 sample (16-bit, 15 fractional bits)
pub type Q15 = i16;

/// Q1.31 sample (32-bit, 31 fractional bits), also the accumulator of Q15 kernels
pub type Q31 = i32;

/// Description of a fixed-point format: total width and fractional bits
///
/// Raw values are carried as `i64` so that every format up to 32 bits, and
/// the double-width product of two such values, is representable before
/// renormalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QFormat {
    total_bits: u32,
    frac_bits: u32,
}

impl QFormat {
    /// 16-bit, 15 fractional bits
    pub const Q15: QFormat = QFormat {
        total_bits: 16,
        frac_bits: 15,
    };

    /// 32-bit, 31 fractional bits
    pub const Q31: QFormat = QFormat {
        total_bits: 32,
        frac_bits: 31,
    };

    /// Creates a format with `total_bits` width and `frac_bits` fractional bits
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless `2 <= total_bits <= 32` and
    /// `frac_bits < total_bits`.
    pub fn new(total_bits: u32, frac_bits: u32) -> Result<Self> {
        if !(2..=32).contains(&total_bits) || frac_bits >= total_bits {
            return Err(DspError::InvalidInput(format!(
                "Unsupported Q-format: {} total bits with {} fractional bits",
                total_bits, frac_bits
            )));
        }
        Ok(QFormat {
            total_bits,
            frac_bits,
        })
    }

    /// Width of the underlying integer in bits
    pub fn total_bits(&self) -> u32 {
        self.total_bits
    }

    /// Number of fractional bits
    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// Smallest representable step, `2^-frac_bits`
    pub fn resolution(&self) -> f64 {
        1.0 / self.scale()
    }

    /// Most negative representable value
    pub fn min_value(&self) -> f64 {
        self.to_f64(self.min_raw())
    }

    /// Most positive representable value
    pub fn max_value(&self) -> f64 {
        self.to_f64(self.max_raw())
    }

    /// Most negative raw integer
    pub fn min_raw(&self) -> i64 {
        -(1i64 << (self.total_bits - 1))
    }

    /// Most positive raw integer
    pub fn max_raw(&self) -> i64 {
        (1i64 << (self.total_bits - 1)) - 1
    }

    /// Wraps `raw` into the format's width with two's-complement semantics
    ///
    /// ```
    /// use qdsp::fixed::QFormat;
    ///
    /// assert_eq!(QFormat::Q15.wrap(0x8000), -0x8000);
    /// assert_eq!(QFormat::Q31.wrap(i32::MAX as i64 + 1), i32::MIN as i64);
    /// ```
    pub fn wrap(&self, raw: i64) -> i64 {
        let unused = 64 - self.total_bits;
        (raw << unused) >> unused
    }

    /// Wrapping addition
    pub fn add(&self, a: i64, b: i64) -> i64 {
        self.wrap(a.wrapping_add(b))
    }

    /// Wrapping subtraction
    pub fn sub(&self, a: i64, b: i64) -> i64 {
        self.wrap(a.wrapping_sub(b))
    }

    /// Fixed-point multiplication with round-half-up renormalisation
    ///
    /// The double-width product is shifted right by `frac_bits` after adding
    /// half an LSB, then wrapped into the format.
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let rounding = if self.frac_bits > 0 {
            1i64 << (self.frac_bits - 1)
        } else {
            0
        };
        self.wrap(a.wrapping_mul(b).wrapping_add(rounding) >> self.frac_bits)
    }

    /// Fixed-point multiplication with truncating renormalisation
    pub fn mul_trunc(&self, a: i64, b: i64) -> i64 {
        self.wrap(a.wrapping_mul(b) >> self.frac_bits)
    }

    /// Converts a raw value to the real number it represents
    pub fn to_f64(&self, raw: i64) -> f64 {
        raw as f64 / self.scale()
    }

    /// Quantises a real number, rounding to nearest and wrapping on overflow
    pub fn from_f64(&self, value: f64) -> i64 {
        self.wrap((value * self.scale()).round() as i64)
    }

    fn scale(&self) -> f64 {
        (1u64 << self.frac_bits) as f64
    }
}

/// Converts a Q1.15 sample to `f64`
pub fn q15_to_f64(x: Q15) -> f64 {
    QFormat::Q15.to_f64(x as i64)
}

/// Converts a Q1.31 sample to `f64`
pub fn q31_to_f64(x: Q31) -> f64 {
    QFormat::Q31.to_f64(x as i64)
}
