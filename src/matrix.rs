//! Complex 16-bit matrix multiplication
//!
//! Complex matrices interleave the real and imaginary part of every element
//! in row-major order. A complex M×N matrix `X` therefore occupies
//! `M * N * 2` slots:
//!
//! ```text
//! Re(X[m, n]) = x[(m * N + n) * 2]
//! Im(X[m, n]) = x[(m * N + n) * 2 + 1]
//! ```
//!
//! Dimensions travel next to the buffers in [`CmplxDims`]. The kernels read
//! caller-owned inputs and write a caller-owned output; they never allocate.
//! Products of two `i16` are accumulated in `i32` and wrap on overflow.
//!
//! # Example
//!
//! ```
//! use qdsp::matrix::{mat_mult_cmplx_i16, CmplxDims};
//!
//! // [1+2i, 3] x [1, i]^T = 1+2i + 3i = 1+5i
//! let a = [1, 2, 3, 0];
//! let b = [1, 0, 0, 1];
//! let mut c = [0i32; 2];
//! mat_mult_cmplx_i16(&a, &b, CmplxDims::new(1, 2, 1), &mut c).unwrap();
//! assert_eq!(c, [1, 5]);
//! ```

use crate::backends::scalar::ScalarBackend;
use crate::backends::{BLayout, CmplxMatMulBackend};
use crate::{DspError, Result};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Dimensions of a complex product `C = A * B`: A is M×N, B is N×O, C is M×O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CmplxDims {
    /// Rows of A and C
    pub m: usize,
    /// Columns of A, rows of B
    pub n: usize,
    /// Columns of B and C
    pub o: usize,
}

impl CmplxDims {
    /// Creates a dimension triple
    pub const fn new(m: usize, n: usize, o: usize) -> Self {
        CmplxDims { m, n, o }
    }

    /// Slots in A (`m * n * 2`)
    ///
    /// The length accessors assume dimensions that fit in memory; use
    /// [`validate`](Self::validate) on untrusted dimensions.
    pub const fn a_len(&self) -> usize {
        self.m * self.n * 2
    }

    /// Slots in B (`n * o * 2`, the same for either layout)
    pub const fn b_len(&self) -> usize {
        self.n * self.o * 2
    }

    /// Slots in C (`m * o * 2`)
    pub const fn c_len(&self) -> usize {
        self.m * self.o * 2
    }

    /// Slots in one row of C
    pub const fn row_len(&self) -> usize {
        self.o * 2
    }

    /// Checks every buffer against the dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a buffer length implied by the dimensions
    /// does not fit in `usize`, otherwise `SizeMismatch` naming the first
    /// malformed operand.
    pub fn validate(&self, a: &[i16], b: &[i16], c: &[i32]) -> Result<()> {
        let (a_len, b_len, c_len) = self.checked_lens().ok_or_else(|| {
            DspError::InvalidInput(format!(
                "Complex matrix dimensions {}x{}x{} overflow the address space",
                self.m, self.n, self.o
            ))
        })?;
        DspError::check_len("a", a_len, a.len())?;
        DspError::check_len("b", b_len, b.len())?;
        DspError::check_len("c", c_len, c.len())
    }

    /// `(a_len, b_len, c_len)`, or `None` if any of them (or a row of C)
    /// overflows `usize`
    fn checked_lens(&self) -> Option<(usize, usize, usize)> {
        let row_len = self.o.checked_mul(2)?;
        let a_len = self.n.checked_mul(2)?.checked_mul(self.m)?;
        let b_len = self.n.checked_mul(row_len)?;
        let c_len = self.m.checked_mul(row_len)?;
        Some((a_len, b_len, c_len))
    }
}

/// Complex matrix multiplication `C = A * B` for 16-bit inputs
///
/// A is M×N, B is N×O, C is M×O, all complex and interleaved. Accumulation is
/// in `i32` with two's-complement wraparound; nothing saturates.
///
/// # Errors
///
/// Returns `SizeMismatch` if a buffer does not match `dims`, or
/// `InvalidInput` if the sizes implied by `dims` overflow. The output is
/// left untouched in either case.
#[cfg_attr(feature = "tracing", instrument(skip(a, b, c), fields(m = dims.m, n = dims.n, o = dims.o)))]
pub fn mat_mult_cmplx_i16(a: &[i16], b: &[i16], dims: CmplxDims, c: &mut [i32]) -> Result<()> {
    dims.validate(a, b, c)?;
    ScalarBackend::mat_mult_cmplx_rows(a, b, dims, BLayout::RowMajor, 0..dims.m, c);
    Ok(())
}

/// Complex matrix multiplication `C = A * B^T` for 16-bit inputs
///
/// A is M×N and `b` holds an O×N matrix whose rows are the columns of the
/// product, so C is M×O. Arithmetic is identical to [`mat_mult_cmplx_i16`].
///
/// # Errors
///
/// Returns `SizeMismatch` if a buffer does not match `dims`, or
/// `InvalidInput` if the sizes implied by `dims` overflow.
#[cfg_attr(feature = "tracing", instrument(skip(a, b, c), fields(m = dims.m, n = dims.n, o = dims.o)))]
pub fn mat_mult_trans_cmplx_i16(
    a: &[i16],
    b: &[i16],
    dims: CmplxDims,
    c: &mut [i32],
) -> Result<()> {
    dims.validate(a, b, c)?;
    ScalarBackend::mat_mult_cmplx_rows(a, b, dims, BLayout::Transposed, 0..dims.m, c);
    Ok(())
}

/// Owned complex matrix with interleaved row-major storage
///
/// A convenience container for callers that do not manage their own
/// buffers. The kernels above work on plain slices and never allocate; this
/// type pairs a buffer with its shape, and [`matmul`](CmplxMatrix::matmul)
/// allocates the product before handing it to [`mat_mult_cmplx_i16`].
///
/// ```
/// use qdsp::matrix::CmplxMatrix;
///
/// let a = CmplxMatrix::from_vec(1, 2, vec![1i16, 2, 3, 0]).unwrap();
/// let b = CmplxMatrix::from_vec(2, 1, vec![1i16, 0, 0, 1]).unwrap();
/// let c = a.matmul(&b).unwrap();
/// assert_eq!(c.get(0, 0), Some((1, 5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmplxMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> CmplxMatrix<T> {
    /// Creates a zero-filled complex matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        CmplxMatrix {
            rows,
            cols,
            data: vec![T::default(); rows * cols * 2],
        }
    }

    /// Wraps interleaved row-major data
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols * 2`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows.checked_mul(cols).and_then(|len| len.checked_mul(2));
        if expected != Some(data.len()) {
            return Err(DspError::InvalidInput(format!(
                "Data length {} does not match complex matrix dimensions {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(CmplxMatrix { rows, cols, data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(re, im)` of element `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<(T, T)> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let idx = (row * self.cols + col) * 2;
        Some((self.data[idx], self.data[idx + 1]))
    }

    /// Interleaved storage
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable interleaved storage
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl CmplxMatrix<i16> {
    /// Multiplies `self * other` into a freshly allocated `i32` matrix
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the inner dimensions differ.
    pub fn matmul(&self, other: &CmplxMatrix<i16>) -> Result<CmplxMatrix<i32>> {
        if self.cols != other.rows {
            return Err(DspError::InvalidInput(format!(
                "Matrix dimension mismatch for multiplication: {}×{} × {}×{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let dims = CmplxDims::new(self.rows, self.cols, other.cols);
        let mut result = CmplxMatrix::<i32>::zeros(self.rows, other.cols);
        mat_mult_cmplx_i16(&self.data, &other.data, dims, &mut result.data)?;
        Ok(result)
    }
}
