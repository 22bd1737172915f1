//! Column-unrolled backend
//!
//! Computes two neighbouring output columns per pass over the inner
//! dimension, so every element of A is loaded once for two products. An odd
//! trailing column falls back to a single-column pass.

use std::ops::Range;

use super::{cmac, BLayout, CmplxMatMulBackend};
use crate::matrix::CmplxDims;

/// Backend producing two output columns per inner loop
pub struct Unroll2Backend;

impl CmplxMatMulBackend for Unroll2Backend {
    fn mat_mult_cmplx_rows(
        a: &[i16],
        b: &[i16],
        dims: CmplxDims,
        layout: BLayout,
        rows: Range<usize>,
        c_rows: &mut [i32],
    ) {
        let row_len = dims.row_len();
        if row_len == 0 {
            return;
        }
        let paired = dims.o & !1;

        for (m, c_row) in rows.zip(c_rows.chunks_exact_mut(row_len)) {
            let a_row = &a[m * dims.n * 2..(m + 1) * dims.n * 2];

            for o in (0..paired).step_by(2) {
                let mut acc0 = (0i32, 0i32);
                let mut acc1 = (0i32, 0i32);
                for (n, a_val) in a_row.chunks_exact(2).enumerate() {
                    let (a_re, a_im) = (a_val[0] as i32, a_val[1] as i32);
                    let b0 = layout.b_offset(dims, n, o);
                    let b1 = layout.b_offset(dims, n, o + 1);
                    acc0 = cmac(acc0, a_re, a_im, b[b0] as i32, b[b0 + 1] as i32);
                    acc1 = cmac(acc1, a_re, a_im, b[b1] as i32, b[b1 + 1] as i32);
                }
                c_row[o * 2..o * 2 + 4].copy_from_slice(&[acc0.0, acc0.1, acc1.0, acc1.1]);
            }

            if paired < dims.o {
                let o = paired;
                let mut acc = (0i32, 0i32);
                for (n, a_val) in a_row.chunks_exact(2).enumerate() {
                    let b_idx = layout.b_offset(dims, n, o);
                    acc = cmac(
                        acc,
                        a_val[0] as i32,
                        a_val[1] as i32,
                        b[b_idx] as i32,
                        b[b_idx + 1] as i32,
                    );
                }
                c_row[o * 2] = acc.0;
                c_row[o * 2 + 1] = acc.1;
            }
        }
    }
}
