//! Row kernels for complex 16-bit matrix multiplication
//!
//! Every backend computes a contiguous block of output rows of `C = A * B`
//! and writes only into the slice holding those rows. The reference kernel
//! and every parallel worker go through this interface, so a row block is
//! computed the same way no matter who computes it.
//!
//! # Backends
//!
//! - `scalar`: direct triple loop, the canonical result
//! - `unrolled`: two output columns per pass over the inner dimension
//!
//! All backends accumulate in `i32` with wrapping arithmetic. Since wrapping
//! addition is associative and commutative modulo 2^32, any backend yields
//! results bit-identical to `scalar`.

use std::ops::Range;

use crate::matrix::CmplxDims;

pub mod scalar;
pub mod unrolled;

/// Storage order of the B operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BLayout {
    /// B is stored N×O, row-major
    #[default]
    RowMajor,
    /// B is stored O×N, row-major; row `o` of B is column `o` of the product
    Transposed,
}

impl BLayout {
    /// Index of `Re(B[n, o])` in the interleaved buffer
    #[inline(always)]
    pub(crate) fn b_offset(self, dims: CmplxDims, n: usize, o: usize) -> usize {
        match self {
            BLayout::RowMajor => (n * dims.o + o) * 2,
            BLayout::Transposed => (o * dims.n + n) * 2,
        }
    }
}

/// Backend trait for complex matrix multiplication row blocks
///
/// Implementations may assume:
/// - `a.len() == dims.a_len()` and `b.len() == dims.b_len()`
/// - `rows.end <= dims.m`
/// - `c_rows.len() == rows.len() * dims.row_len()`, holding exactly the
///   output rows in `rows`
pub trait CmplxMatMulBackend {
    /// Computes output rows `rows` of `A * B` into `c_rows`
    fn mat_mult_cmplx_rows(
        a: &[i16],
        b: &[i16],
        dims: CmplxDims,
        layout: BLayout,
        rows: Range<usize>,
        c_rows: &mut [i32],
    );
}

/// Complex multiply-accumulate of one term into `(re, im)`, wrapping at 32 bits
///
/// Each 16×16 product fits `i32`; only the sums can wrap.
#[inline(always)]
pub(crate) fn cmac(acc: (i32, i32), a_re: i32, a_im: i32, b_re: i32, b_im: i32) -> (i32, i32) {
    let re = (a_re * b_re).wrapping_sub(a_im * b_im);
    let im = (a_re * b_im).wrapping_add(a_im * b_re);
    (acc.0.wrapping_add(re), acc.1.wrapping_add(im))
}
