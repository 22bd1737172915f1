//! Scalar reference backend
//!
//! A direct triple loop with no blocking or tiling. This is the canonical
//! result every other backend and every parallel partition must reproduce.

use std::ops::Range;

use super::{cmac, BLayout, CmplxMatMulBackend};
use crate::matrix::CmplxDims;

/// Scalar backend (portable, one output element per inner loop)
pub struct ScalarBackend;

impl CmplxMatMulBackend for ScalarBackend {
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
        for (m, c_row) in rows.zip(c_rows.chunks_exact_mut(row_len)) {
            for o in 0..dims.o {
                let mut acc = (0i32, 0i32);
                for n in 0..dims.n {
                    let a_idx = (m * dims.n + n) * 2;
                    let b_idx = layout.b_offset(dims, n, o);
                    acc = cmac(
                        acc,
                        a[a_idx] as i32,
                        a[a_idx + 1] as i32,
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
