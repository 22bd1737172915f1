//! Integration Test Suite
//!
//! End-to-end checks of the public API:
//! - Reference kernel against an independent wide-integer oracle
//! - Parallel kernel against the reference for every interesting `n_pe`
//! - Trigonometric identities of the table engine

use proptest::prelude::*;
use qdsp::cluster::SerialCluster;
use qdsp::fast_math::{cos_q15, sin_q15, FULL_CYCLE_Q15, QUARTER_CYCLE_Q15};
use qdsp::matrix::{mat_mult_cmplx_i16, mat_mult_trans_cmplx_i16, CmplxDims};
use qdsp::parallel::{mat_mult_cmplx_i16_parallel, mat_mult_trans_cmplx_i16_parallel};

// ============================================================================
// PROPERTY TEST CONFIGURATION
// ============================================================================

const PROPTEST_CASES: u32 = 64;

/// Brute-force complex product in i64, wrapped to i32 at the end
///
/// Wrapping once at the end equals wrapping after every step because
/// addition modulo 2^32 is associative.
fn oracle(a: &[i16], b: &[i16], dims: CmplxDims) -> Vec<i32> {
    let mut c = vec![0i32; dims.c_len()];
    for m in 0..dims.m {
        for o in 0..dims.o {
            let mut re: i64 = 0;
            let mut im: i64 = 0;
            for n in 0..dims.n {
                let (ar, ai) = (a[(m * dims.n + n) * 2] as i64, a[(m * dims.n + n) * 2 + 1] as i64);
                let (br, bi) = (b[(n * dims.o + o) * 2] as i64, b[(n * dims.o + o) * 2 + 1] as i64);
                re += ar * br - ai * bi;
                im += ar * bi + ai * br;
            }
            c[(m * dims.o + o) * 2] = re as i32;
            c[(m * dims.o + o) * 2 + 1] = im as i32;
        }
    }
    c
}

fn transpose(b: &[i16], dims: CmplxDims) -> Vec<i16> {
    let mut t = vec![0i16; b.len()];
    for n in 0..dims.n {
        for o in 0..dims.o {
            t[(o * dims.n + n) * 2] = b[(n * dims.o + o) * 2];
            t[(o * dims.n + n) * 2 + 1] = b[(n * dims.o + o) * 2 + 1];
        }
    }
    t
}

fn operands(value: impl Strategy<Value = i16> + Clone) -> impl Strategy<Value = (CmplxDims, Vec<i16>, Vec<i16>)> {
    (1usize..8, 1usize..8, 1usize..8).prop_flat_map(move |(m, n, o)| {
        let dims = CmplxDims::new(m, n, o);
        (
            Just(dims),
            prop::collection::vec(value.clone(), dims.a_len()),
            prop::collection::vec(value.clone(), dims.b_len()),
        )
    })
}

// ============================================================================
// REFERENCE KERNEL
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// Small entries never overflow; result equals the exact product
    #[test]
    fn integration_reference_small_entries((dims, a, b) in operands(-100i16..100)) {
        let mut c = vec![0i32; dims.c_len()];
        mat_mult_cmplx_i16(&a, &b, dims, &mut c).unwrap();
        prop_assert_eq!(c, oracle(&a, &b, dims));
    }

    /// Full-range entries overflow; result equals the wrapped exact product
    #[test]
    fn integration_reference_full_range((dims, a, b) in operands(any::<i16>())) {
        let mut c = vec![0i32; dims.c_len()];
        mat_mult_cmplx_i16(&a, &b, dims, &mut c).unwrap();
        prop_assert_eq!(c, oracle(&a, &b, dims));
    }

    /// The transposed kernel computes the same product from B^T
    #[test]
    fn integration_transposed_reference((dims, a, b) in operands(any::<i16>())) {
        let b_t = transpose(&b, dims);
        let mut c = vec![0i32; dims.c_len()];
        mat_mult_trans_cmplx_i16(&a, &b_t, dims, &mut c).unwrap();
        prop_assert_eq!(c, oracle(&a, &b, dims));
    }
}

// ============================================================================
// PARALLEL KERNEL
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// Parallel output equals the reference for n_pe in {1, 2, 3, M, M + 1}
    #[test]
    fn integration_parallel_matches_reference((dims, a, b) in operands(any::<i16>())) {
        let mut expected = vec![0i32; dims.c_len()];
        mat_mult_cmplx_i16(&a, &b, dims, &mut expected).unwrap();

        let platform = SerialCluster::on_cluster(0);
        for n_pe in [1, 2, 3, dims.m, dims.m + 1] {
            let mut c = vec![0i32; dims.c_len()];
            mat_mult_cmplx_i16_parallel(&platform, &a, &b, dims, n_pe, &mut c).unwrap();
            prop_assert_eq!(&c, &expected, "n_pe = {}", n_pe);
        }
    }

    /// Same for the transposed layout
    #[test]
    fn integration_trans_parallel_matches_reference((dims, a, b) in operands(any::<i16>())) {
        let b_t = transpose(&b, dims);
        let mut expected = vec![0i32; dims.c_len()];
        mat_mult_trans_cmplx_i16(&a, &b_t, dims, &mut expected).unwrap();

        let platform = SerialCluster::on_cluster(0);
        for n_pe in [1, 2, 3, dims.m, dims.m + 1] {
            let mut c = vec![0i32; dims.c_len()];
            mat_mult_trans_cmplx_i16_parallel(&platform, &a, &b_t, dims, n_pe, &mut c).unwrap();
            prop_assert_eq!(&c, &expected, "n_pe = {}", n_pe);
        }
    }

    /// The control core never writes, whatever the input size
    #[test]
    fn integration_control_core_writes_nothing((dims, a, b) in operands(any::<i16>()), fill in any::<i32>()) {
        let mut c = vec![fill; dims.c_len()];
        let result = mat_mult_cmplx_i16_parallel(&SerialCluster::on_control(), &a, &b, dims, 2, &mut c);
        prop_assert!(result.is_err());
        prop_assert!(c.iter().all(|&v| v == fill));
    }
}

#[cfg(feature = "parallel")]
mod host_cluster {
    use super::*;
    use proptest::prelude::*;
    use qdsp::cluster::{ClusterConfig, HostCluster};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Real threads produce the same bits as the reference
        #[test]
        fn integration_host_cluster_matches_reference((dims, a, b) in operands(any::<i16>())) {
            let cluster = HostCluster::new(ClusterConfig::new().with_num_cores(4)).unwrap();
            let mut expected = vec![0i32; dims.c_len()];
            mat_mult_cmplx_i16(&a, &b, dims, &mut expected).unwrap();

            for n_pe in [1, 2, 3, dims.m, dims.m + 1] {
                let mut c = vec![0i32; dims.c_len()];
                cluster
                    .offload(|| mat_mult_cmplx_i16_parallel(&cluster, &a, &b, dims, n_pe, &mut c))
                    .unwrap();
                prop_assert_eq!(&c, &expected, "n_pe = {}", n_pe);
            }
        }
    }
}

// ============================================================================
// TRIGONOMETRY
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// cos(x) takes exactly the sine path of x + pi/2
    #[test]
    fn integration_cos_is_shifted_sin(x in any::<i16>()) {
        let shifted = (x as u16).wrapping_add(QUARTER_CYCLE_Q15) as i16;
        prop_assert_eq!(cos_q15(x), sin_q15(shifted));
    }

    /// cos(x) == cos(x + 2*pi) modulo the 16-bit wrap
    #[test]
    fn integration_cos_periodic(x in any::<i16>()) {
        let shifted = (x as u16).wrapping_add(FULL_CYCLE_Q15) as i16;
        prop_assert_eq!(cos_q15(x), cos_q15(shifted));
    }

    /// sin(-x) == -sin(x) within the truncation error of the tables
    #[test]
    fn integration_sin_odd(x in 1i16..0x4000) {
        let neg = 0x8000u16.wrapping_sub(x as u16) as i16;
        let sum = sin_q15(x) as i32 + sin_q15(neg) as i32;
        prop_assert!(sum.abs() <= 10, "sin({}) + sin({}) = {}", x, neg, sum);
    }
}
