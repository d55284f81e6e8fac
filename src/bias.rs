//! Bias normalization
//!
//! A polynomial with `n` coefficients has `n - 1` nesting levels, and each level
//! may carry an offset subtracted from the evaluation point. Callers may supply
//! fewer offsets than levels; the missing ones are zero and sit at the
//! highest-order levels.
//!
//! Two layouts are produced:
//!
//! - **normalized** (`n - 1` entries): `bias[i - 1]` pairs with coefficient `i`.
//!   The scalar evaluator reads this layout.
//! - **aligned** (`n` entries): a leading zero followed by the normalized
//!   values, so `aligned[j]` pairs with coefficient `j`. Every lane-group
//!   backend reads this layout, tail included.

use crate::{PolyEvalError, Result};

/// Validate `bias` against `coeff_len` and zero-pad it to `coeff_len - 1` entries.
///
/// Returns an empty array when `coeff_len == 0`; the public entry points
/// short-circuit before reaching this.
///
/// # Errors
///
/// Returns [`PolyEvalError::InvalidBiasLength`] if `bias.len() >= coeff_len`.
///
/// # Examples
///
/// ```
/// use polyeval::bias::normalize;
///
/// assert_eq!(normalize(4, None).unwrap(), vec![0.0, 0.0, 0.0]);
/// assert_eq!(normalize(4, Some(&[7.0])).unwrap(), vec![7.0, 0.0, 0.0]);
/// assert!(normalize(2, Some(&[1.0, 2.0])).is_err());
/// ```
pub fn normalize(coeff_len: usize, bias: Option<&[f64]>) -> Result<Vec<f64>> {
    let levels = coeff_len.saturating_sub(1);
    let mut normalized = vec![0.0; levels];

    if let Some(b) = bias {
        if coeff_len > 0 && b.len() >= coeff_len {
            return Err(PolyEvalError::InvalidBiasLength {
                bias_len: b.len(),
                coeff_len,
            });
        }
        let supplied = b.len().min(levels);
        normalized[..supplied].copy_from_slice(&b[..supplied]);
    }

    Ok(normalized)
}

/// Same as [`normalize`], with one leading zero so index `j` pairs with coefficient `j`.
///
/// # Errors
///
/// Returns [`PolyEvalError::InvalidBiasLength`] if `bias.len() >= coeff_len`.
///
/// # Examples
///
/// ```
/// use polyeval::bias::normalize_aligned;
///
/// assert_eq!(
///     normalize_aligned(4, Some(&[7.0])).unwrap(),
///     vec![0.0, 7.0, 0.0, 0.0]
/// );
/// ```
pub fn normalize_aligned(coeff_len: usize, bias: Option<&[f64]>) -> Result<Vec<f64>> {
    let normalized = normalize(coeff_len, bias)?;
    Ok(align(&normalized))
}

/// Prefix a normalized bias array with the dummy zero read for coefficient 0.
pub(crate) fn align(normalized: &[f64]) -> Vec<f64> {
    let mut aligned = Vec::with_capacity(normalized.len() + 1);
    aligned.push(0.0);
    aligned.extend_from_slice(normalized);
    aligned
}
