//! qdsp: Fixed-Point DSP Kernels for Multi-Core Embedded Targets
//!
//! **qdsp** provides numerically well-defined signal-processing primitives for
//! cores without a floating-point unit:
//!
//! 1. **Q-format arithmetic** - two's-complement fixed point, wraparound on
//!    overflow, never saturating
//! 2. **Table-driven trigonometry** - Q1.15 sine and cosine by linear
//!    interpolation in a compiled-in table
//! 3. **Complex matrix multiplication** - 16-bit inputs, 32-bit accumulation
//! 4. **Fork-join dispatch** - the same matrix kernel split by rows across
//!    the compute elements of a cluster, bit-identical to the single-core run
//!
//! # Design Principles
//!
//! - **Bit-exact**: results match legacy fixed-point code, including the
//!   truncation bias of the trig tables and accumulator wraparound
//! - **Caller-owned buffers**: kernels read and write slices, never allocate
//! - **Explicit dispatch errors**: starting a parallel kernel from the control
//!   core returns an error and writes nothing
//!
//! # Quick Start
//!
//! ```rust
//! use qdsp::fast_math::cos_q15;
//! use qdsp::matrix::{mat_mult_cmplx_i16, CmplxDims};
//!
//! assert_eq!(cos_q15(0), 32766);
//!
//! let a = [1, 2, 3, 0]; // [1+2i, 3+0i]
//! let b = [1, 0, 0, 1]; // [1+0i, 0+1i]^T
//! let mut c = [0i32; 2];
//! mat_mult_cmplx_i16(&a, &b, CmplxDims::new(1, 2, 1), &mut c).unwrap();
//! assert_eq!(c, [1, 5]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): `HostCluster`, a rayon-backed cluster emulation
//! - `tracing` (default): spans on kernel entry points and dispatch diagnostics

pub mod backends;
pub mod cluster;
pub mod error;
pub mod fast_math;
pub mod fixed;
pub mod matrix;
pub mod parallel;
pub mod tables;

pub use error::{DspError, Result};
pub use matrix::{CmplxDims, CmplxMatrix};

/// Row kernel used by parallel workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Direct triple loop (reference)
    Scalar,
    /// Two output columns per inner pass
    Unroll2,
}

impl Backend {
    /// The fastest row kernel for this build
    ///
    /// Every backend produces identical results, so this only affects speed.
    pub fn select_best() -> Self {
        Backend::Unroll2
    }
}
