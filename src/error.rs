//! Error types for qdsp kernels

use thiserror::Error;

/// Result type for qdsp operations
pub type Result<T> = std::result::Result<T, DspError>;

/// Errors that can occur while dispatching a kernel
///
/// Arithmetic overflow is not represented here: every kernel wraps silently
/// in two's complement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DspError {
    /// Parallel entry point called from the orchestrating control core
    #[error("Parallel processing is only supported on the cluster side")]
    InvalidDispatchContext,

    /// Buffer length does not match the declared dimensions
    #[error("Size mismatch for {operand}: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Which operand was malformed
        operand: &'static str,
        /// Length implied by the dimensions
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The host cluster could not be brought up
    #[error("Cluster setup failed: {0}")]
    ClusterSetup(String),
}

impl DspError {
    /// Checks a buffer length against the length implied by its dimensions
    pub(crate) fn check_len(operand: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(DspError::SizeMismatch {
                operand,
                expected,
                actual,
            })
        }
    }
}
