//! Error types for polynomial evaluation

use thiserror::Error;

use crate::Backend;

/// Result type for polyeval operations
pub type Result<T> = std::result::Result<T, PolyEvalError>;

/// Errors that can occur during polynomial evaluation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolyEvalError {
    /// Bias sequence has as many or more entries than there are coefficients
    #[error("Invalid bias length: total bias count {bias_len} must be less than coefficient count {coeff_len}")]
    InvalidBiasLength {
        /// Number of bias values supplied
        bias_len: usize,
        /// Number of coefficients
        coeff_len: usize,
    },

    /// Backend explicitly requested but not executable on this host
    #[error("Backend not supported on this platform: {0:?}")]
    UnsupportedBackend(Backend),
}
