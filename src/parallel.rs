//! Fork-join parallel complex matrix multiplication
//!
//! A parallel call splits the rows of the output across `n_pe` compute
//! elements. Every element runs the reference row kernel on its own
//! contiguous block of rows, so the result is bit-identical to
//! [`mat_mult_cmplx_i16`](crate::matrix::mat_mult_cmplx_i16) for any `n_pe`.
//!
//! Inputs are shared read-only by all workers. The output is shared too, but
//! every worker writes only the rows of its own block, so no locking is
//! needed. The call returns once every worker has finished.
//!
//! Parallel kernels may only be started from inside a compute cluster. A
//! call from the control core fails with
//! [`DspError::InvalidDispatchContext`] and leaves the output untouched.
//!
//! # Example
//!
//! ```
//! use qdsp::cluster::SerialCluster;
//! use qdsp::matrix::CmplxDims;
//! use qdsp::parallel::mat_mult_cmplx_i16_parallel;
//!
//! let a = [1, 2, 3, 0];
//! let b = [1, 0, 0, 1];
//! let mut c = [0i32; 2];
//! let platform = SerialCluster::on_cluster(0);
//! mat_mult_cmplx_i16_parallel(&platform, &a, &b, CmplxDims::new(1, 2, 1), 4, &mut c).unwrap();
//! assert_eq!(c, [1, 5]);
//! ```

use std::marker::PhantomData;
use std::ops::Range;
use std::sync::atomic::{AtomicPtr, Ordering};

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace, warn};

use crate::backends::scalar::ScalarBackend;
use crate::backends::unrolled::Unroll2Backend;
use crate::backends::{BLayout, CmplxMatMulBackend};
use crate::cluster::Platform;
use crate::matrix::CmplxDims;
use crate::{Backend, DspError, Result};

/// Rows of a `rows`-row output assigned to compute element `core_id` of `n_pe`
///
/// Blocks are contiguous, disjoint and cover `0..rows` in element order. When
/// `rows` is not a multiple of `n_pe`, the lowest-indexed elements get one
/// extra row each. Elements past `rows` get an empty range.
///
/// ```
/// use qdsp::parallel::row_range;
///
/// // 7 rows over 3 elements: 3 + 2 + 2
/// assert_eq!(row_range(0, 3, 7), 0..3);
/// assert_eq!(row_range(1, 3, 7), 3..5);
/// assert_eq!(row_range(2, 3, 7), 5..7);
///
/// // more elements than rows
/// assert!(row_range(5, 6, 2).is_empty());
/// ```
///
/// # Panics
///
/// Panics if `n_pe` is zero.
pub fn row_range(core_id: usize, n_pe: usize, rows: usize) -> Range<usize> {
    let base = rows / n_pe;
    let extra = rows % n_pe;
    let start = core_id * base + core_id.min(extra);
    let len = base + usize::from(core_id < extra);
    let start = start.min(rows);
    start..(start + len).min(rows)
}

/// Everything a worker needs to compute its share of a product
///
/// Shared read-only by every worker of one parallel call. The output buffer
/// is passed separately so that the descriptor stays immutable.
#[derive(Debug, Clone, Copy)]
pub struct ParallelTask<'a> {
    /// Left operand, M×N complex
    pub a: &'a [i16],
    /// Right operand, N×O (or O×N when transposed) complex
    pub b: &'a [i16],
    /// Product dimensions
    pub dims: CmplxDims,
    /// Number of compute elements to fork
    pub n_pe: usize,
    /// Storage order of `b`
    pub layout: BLayout,
    /// Row kernel each worker runs
    pub backend: Backend,
}

impl<'a> ParallelTask<'a> {
    /// Describes `A * B` split across `n_pe` elements, B row-major
    pub fn new(a: &'a [i16], b: &'a [i16], dims: CmplxDims, n_pe: usize) -> Self {
        ParallelTask {
            a,
            b,
            dims,
            n_pe,
            layout: BLayout::RowMajor,
            backend: Backend::select_best(),
        }
    }

    /// Sets the storage order of `b`
    pub fn with_layout(mut self, layout: BLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the row kernel
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Rows computed by compute element `core_id`
    pub fn rows_for(&self, core_id: usize) -> Range<usize> {
        row_range(core_id, self.n_pe, self.dims.m)
    }
}

/// Output buffer shared by workers that each own a disjoint block of rows
///
/// Holds the exclusive borrow of the output for the whole fork, and hands
/// out row blocks through a raw pointer.
struct DisjointRows<'a> {
    ptr: AtomicPtr<i32>,
    len: usize,
    row_len: usize,
    _borrow: PhantomData<&'a mut [i32]>,
}

impl<'a> DisjointRows<'a> {
    fn new(out: &'a mut [i32], row_len: usize) -> Self {
        DisjointRows {
            len: out.len(),
            ptr: AtomicPtr::new(out.as_mut_ptr()),
            row_len,
            _borrow: PhantomData,
        }
    }

    /// Mutable view of output rows `rows`
    ///
    /// # Safety
    ///
    /// No two live views may cover the same row.
    #[allow(clippy::mut_from_ref)]
    unsafe fn rows_mut(&self, rows: Range<usize>) -> &mut [i32] {
        let start = rows.start * self.row_len;
        let end = rows.end * self.row_len;
        assert!(start <= end && end <= self.len, "row block out of bounds");
        let ptr = self.ptr.load(Ordering::Relaxed);
        std::slice::from_raw_parts_mut(ptr.add(start), end - start)
    }
}

/// Per-element entry point: computes the rows assigned to `core_id`
fn mat_mult_cmplx_worker(task: &ParallelTask<'_>, core_id: usize, out: &DisjointRows<'_>) {
    let rows = task.rows_for(core_id);

    #[cfg(feature = "tracing")]
    trace!(core_id, start = rows.start, end = rows.end, "worker rows");

    if rows.is_empty() {
        return;
    }

    // SAFETY: row_range gives every core_id in 0..n_pe a disjoint block, and
    // the fork runs each core_id exactly once, so no two views overlap.
    let c_rows = unsafe { out.rows_mut(rows.clone()) };

    match task.backend {
        Backend::Scalar => {
            ScalarBackend::mat_mult_cmplx_rows(task.a, task.b, task.dims, task.layout, rows, c_rows)
        }
        Backend::Unroll2 => {
            Unroll2Backend::mat_mult_cmplx_rows(task.a, task.b, task.dims, task.layout, rows, c_rows)
        }
    }
}

/// Runs `task` on `platform`, writing the product into `c`
///
/// Checks, in order: the caller is on a compute cluster, `n_pe >= 1`, and
/// every buffer matches `task.dims`. Any failure returns before `c` is
/// touched. Otherwise forks `task.n_pe` workers and joins them.
///
/// # Errors
///
/// - `InvalidDispatchContext` when called from the control core
/// - `InvalidInput` when `task.n_pe == 0` or the sizes implied by
///   `task.dims` overflow
/// - `SizeMismatch` when a buffer does not match `task.dims`
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(m = task.dims.m, n = task.dims.n, o = task.dims.o, n_pe = task.n_pe)))]
pub fn run_parallel<P>(platform: &P, task: &ParallelTask<'_>, c: &mut [i32]) -> Result<()>
where
    P: Platform + ?Sized,
{
    if platform.execution_context().is_control() {
        #[cfg(feature = "tracing")]
        warn!("parallel processing supported only for cluster side");
        return Err(DspError::InvalidDispatchContext);
    }
    if task.n_pe == 0 {
        return Err(DspError::InvalidInput(
            "n_pe must be at least 1".to_string(),
        ));
    }
    task.dims.validate(task.a, task.b, c)?;

    #[cfg(feature = "tracing")]
    debug!(backend = ?task.backend, layout = ?task.layout, "forking row workers");

    let out = DisjointRows::new(c, task.dims.row_len());
    platform.fork(task.n_pe, &|core_id| mat_mult_cmplx_worker(task, core_id, &out));
    Ok(())
}

/// Parallel `C = A * B` for complex 16-bit matrices on `n_pe` elements
///
/// Same contract and result as
/// [`mat_mult_cmplx_i16`](crate::matrix::mat_mult_cmplx_i16); see
/// [`run_parallel`] for the errors.
pub fn mat_mult_cmplx_i16_parallel<P>(
    platform: &P,
    a: &[i16],
    b: &[i16],
    dims: CmplxDims,
    n_pe: usize,
    c: &mut [i32],
) -> Result<()>
where
    P: Platform + ?Sized,
{
    run_parallel(platform, &ParallelTask::new(a, b, dims, n_pe), c)
}

/// Parallel `C = A * B^T` for complex 16-bit matrices on `n_pe` elements
///
/// `b` holds an O×N matrix. Same result as
/// [`mat_mult_trans_cmplx_i16`](crate::matrix::mat_mult_trans_cmplx_i16).
pub fn mat_mult_trans_cmplx_i16_parallel<P>(
    platform: &P,
    a: &[i16],
    b: &[i16],
    dims: CmplxDims,
    n_pe: usize,
    c: &mut [i32],
) -> Result<()>
where
    P: Platform + ?Sized,
{
    let task = ParallelTask::new(a, b, dims, n_pe).with_layout(BLayout::Transposed);
    run_parallel(platform, &task, c)
}
