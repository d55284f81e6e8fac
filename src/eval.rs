//! Evaluation entry points and backend dispatch
//!
//! [`eval_scalar`] and [`eval_vectorized`] expose the two evaluation paths
//! independently; [`eval`] picks one based on the detected host backend, and
//! [`eval_with_backend`] forces a specific backend.
//!
//! # Bias layouts
//!
//! The scalar path reads the normalized bias (`bias[i - 1]` for `c[i]`) while
//! the lane-group path, tail included, reads the aligned bias (`aligned[j]` for
//! `c[j]`). See [`crate::bias`].

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::backends::scalar::ScalarBackend;
use crate::backends::HornerBackend;
use crate::bias::{normalize, normalize_aligned};
use crate::{detected_backend, Backend, PolyEvalError, Result};

#[cfg(target_arch = "x86_64")]
use crate::backends::{avx2::Avx2Backend, avx512::Avx512Backend, sse2::Sse2Backend};

#[cfg(target_arch = "aarch64")]
use crate::backends::neon::NeonBackend;

#[cfg(target_arch = "wasm32")]
use crate::backends::wasm::WasmBackend;

/// Evaluation strategy
///
/// A single seam for targeting either evaluation path, used by the
/// dispatcher, tests and benchmarks alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Point-by-point reference path
    Scalar,
    /// Lane-group path on the detected backend
    Vectorized,
    /// Vectorized when the host has a SIMD backend, Scalar otherwise
    Auto,
}

impl Strategy {
    /// Strategy the dispatcher uses on this host
    ///
    /// # Examples
    ///
    /// ```
    /// use polyeval::{detected_backend, Strategy};
    ///
    /// let strategy = Strategy::select();
    /// assert_eq!(strategy == Strategy::Vectorized, detected_backend().is_simd());
    /// ```
    pub fn select() -> Self {
        if detected_backend().is_simd() {
            Strategy::Vectorized
        } else {
            Strategy::Scalar
        }
    }

    /// Resolve `Auto` to a concrete strategy
    pub fn resolve(self) -> Self {
        match self {
            Strategy::Auto => Strategy::select(),
            other => other,
        }
    }

    /// Evaluate `c` with bias `b` at every point of `x` using this strategy
    ///
    /// # Errors
    ///
    /// Returns [`PolyEvalError::InvalidBiasLength`] if `b` has `c.len()` or more entries.
    pub fn eval(self, c: &[f64], x: &[f64], b: Option<&[f64]>) -> Result<Vec<f64>> {
        match self.resolve() {
            Strategy::Vectorized => eval_vectorized(c, x, b),
            Strategy::Scalar | Strategy::Auto => eval_scalar(c, x, b),
        }
    }
}

/// Evaluate a biased Horner polynomial at every point, auto-selecting the evaluation path
///
/// Uses the vectorized path when the host supports a SIMD backend and the
/// scalar path otherwise.
///
/// # Examples
///
/// ```
/// use polyeval::eval;
///
/// let y = eval(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 8.0], None).unwrap();
/// assert_eq!(y, vec![10.0, 49.0, 142.0, 313.0, 586.0, 1534.0, 2257.0]);
/// ```
///
/// # Errors
///
/// Returns [`PolyEvalError::InvalidBiasLength`] if `b` has `c.len()` or more entries.
/// Empty `c` always yields an empty result and is never an error.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(coeffs = c.len(), points = x.len())))]
pub fn eval(c: &[f64], x: &[f64], b: Option<&[f64]>) -> Result<Vec<f64>> {
    Strategy::Auto.eval(c, x, b)
}

/// Evaluate point by point with the scalar reference recurrence
///
/// ```text
/// y = 0
/// for i in (1..n).rev() { y = (x - bias[i - 1]) * (c[i] + y) }
/// y + c[0]
/// ```
///
/// # Examples
///
/// ```
/// use polyeval::eval_scalar;
///
/// let y = eval_scalar(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], Some(&[1.0, 2.0])).unwrap();
/// assert_eq!(y, vec![1.0, 3.0, 11.0]);
///
/// assert!(eval_scalar(&[1.0, 2.0, 3.0], &[1.0], Some(&[0.0, 1.0, 3.0])).is_err());
/// ```
///
/// # Errors
///
/// Returns [`PolyEvalError::InvalidBiasLength`] if `b` has `c.len()` or more entries.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(coeffs = c.len(), points = x.len())))]
pub fn eval_scalar(c: &[f64], x: &[f64], b: Option<&[f64]>) -> Result<Vec<f64>> {
    if c.is_empty() {
        return Ok(Vec::new());
    }

    let bias = normalize(c.len(), b)?;
    Ok(scalar_points(c, &bias, x))
}

/// Evaluate in lane groups on the detected backend, finishing leftover points one at a time
///
/// The first `x.len() - x.len() % W` points are evaluated `W` at a time, where
/// `W` is [`crate::lane_width`]; the remaining points use the scalar recurrence
/// on the aligned bias. On hosts without a SIMD backend `W` is 1.
///
/// # Examples
///
/// ```
/// use polyeval::eval_vectorized;
///
/// let x: Vec<f64> = (1..=14).map(f64::from).collect();
/// let y = eval_vectorized(&[1.0, 2.0, 3.0, 4.0, 5.0], &x, Some(&[3.0, 4.0, 5.0])).unwrap();
/// assert_eq!(y[..3], [-201.0, -79.0, 1.0]);
/// assert_eq!(y[13], 73613.0);
/// ```
///
/// # Errors
///
/// Returns [`PolyEvalError::InvalidBiasLength`] if `b` has `c.len()` or more entries.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(coeffs = c.len(), points = x.len())))]
pub fn eval_vectorized(c: &[f64], x: &[f64], b: Option<&[f64]>) -> Result<Vec<f64>> {
    if c.is_empty() {
        return Ok(Vec::new());
    }

    let aligned = normalize_aligned(c.len(), b)?;
    Ok(lane_points(detected_backend(), c, &aligned, x))
}

/// Evaluate on an explicitly chosen backend
///
/// `Backend::Scalar` runs the scalar reference path, `Backend::Auto` behaves
/// like [`eval_vectorized`], and every SIMD backend runs its own lane-group
/// kernel.
///
/// # Examples
///
/// ```
/// use polyeval::{eval_with_backend, Backend};
///
/// let y = eval_with_backend(&[1.0, 2.0], &[3.0], None, Backend::Scalar).unwrap();
/// assert_eq!(y, vec![7.0]);
/// ```
///
/// # Errors
///
/// - [`PolyEvalError::UnsupportedBackend`] if the host cannot execute `backend`
/// - [`PolyEvalError::InvalidBiasLength`] if `b` has `c.len()` or more entries
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(coeffs = c.len(), points = x.len(), backend = ?backend)))]
pub fn eval_with_backend(
    c: &[f64],
    x: &[f64],
    b: Option<&[f64]>,
    backend: Backend,
) -> Result<Vec<f64>> {
    let backend = resolve_backend(backend)?;
    if c.is_empty() {
        return Ok(Vec::new());
    }

    if backend == Backend::Scalar {
        let bias = normalize(c.len(), b)?;
        return Ok(scalar_points(c, &bias, x));
    }

    let aligned = normalize_aligned(c.len(), b)?;
    Ok(lane_points(backend, c, &aligned, x))
}

/// Resolve `Auto` and reject backends this host cannot execute
pub(crate) fn resolve_backend(backend: Backend) -> Result<Backend> {
    match backend {
        Backend::Auto => Ok(detected_backend()),
        other if other.is_available() => Ok(other),
        other => Err(PolyEvalError::UnsupportedBackend(other)),
    }
}

/// Scalar reference path over a normalized bias
pub(crate) fn scalar_points(c: &[f64], bias: &[f64], x: &[f64]) -> Vec<f64> {
    let mut result = vec![0.0; x.len()];
    ScalarBackend::eval(c, bias, x, &mut result);
    result
}

/// Lane-group path over an aligned bias
pub(crate) fn lane_points(backend: Backend, c: &[f64], aligned: &[f64], x: &[f64]) -> Vec<f64> {
    let mut result = vec![0.0; x.len()];
    lanes_into(backend, c, aligned, x, &mut result);
    result
}

/// Dispatch the lane-group kernel of `backend` into `result`
///
/// `backend` must be resolved (not `Auto`) and available on this host, `c` must
/// not be empty and `aligned.len() == c.len()`.
pub(crate) fn lanes_into(
    backend: Backend,
    c: &[f64],
    aligned: &[f64],
    x: &[f64],
    result: &mut [f64],
) {
    debug_assert!(!c.is_empty());
    debug_assert_eq!(aligned.len(), c.len());
    debug_assert!(result.len() >= x.len());

    // SAFETY: callers only pass backends resolved through `resolve_backend` or
    // `detected_backend`, so the instruction set is present; slice lengths are
    // checked above.
    unsafe {
        match backend {
            Backend::Scalar | Backend::Auto => {
                ScalarBackend::horner(c, aligned, x, result);
            }
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 => {
                Sse2Backend::horner(c, aligned, x, result);
            }
            #[cfg(target_arch = "x86_64")]
            Backend::AVX | Backend::AVX2 => {
                Avx2Backend::horner(c, aligned, x, result);
            }
            #[cfg(target_arch = "x86_64")]
            Backend::AVX512 => {
                Avx512Backend::horner(c, aligned, x, result);
            }
            #[cfg(target_arch = "aarch64")]
            Backend::NEON => {
                NeonBackend::horner(c, aligned, x, result);
            }
            #[cfg(target_arch = "wasm32")]
            Backend::WasmSIMD => {
                WasmBackend::horner(c, aligned, x, result);
            }
            // Backends compiled out for this target; `resolve_backend` refuses them
            _ => {
                ScalarBackend::horner(c, aligned, x, result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(range: std::ops::RangeInclusive<i32>) -> Vec<f64> {
        range.map(f64::from).collect()
    }

    #[test]
    fn test_empty_coefficients_yield_empty_result() {
        let x = [1.0, 2.0, 3.0];
        assert!(eval(&[], &x, None).unwrap().is_empty());
        assert!(eval_scalar(&[], &x, None).unwrap().is_empty());
        assert!(eval_vectorized(&[], &x, None).unwrap().is_empty());
    }

    #[test]
    fn test_empty_coefficients_ignore_oversized_bias() {
        let b = [1.0, 2.0, 3.0];
        assert!(eval(&[], &[1.0], Some(&b)).unwrap().is_empty());
        assert!(eval_scalar(&[], &[1.0], Some(&b)).unwrap().is_empty());
        assert!(eval_vectorized(&[], &[1.0], Some(&b)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_points() {
        assert!(eval(&[1.0, 2.0], &[], None).unwrap().is_empty());
        let y = eval_vectorized(&[1.0, 2.0], &[], Some(&[1.0])).unwrap();
        assert!(y.is_empty());
    }

    #[test]
    fn test_cubic_without_bias() {
        let c = [1.0, 2.0, 3.0, 4.0];
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 8.0];
        let expected = vec![10.0, 49.0, 142.0, 313.0, 586.0, 1534.0, 2257.0];

        assert_eq!(eval(&c, &x, None).unwrap(), expected);
        assert_eq!(eval_scalar(&c, &x, None).unwrap(), expected);
        assert_eq!(eval_vectorized(&c, &x, None).unwrap(), expected);
    }

    #[test]
    fn test_sixteen_points_without_bias() {
        let c = [1.0, 2.0, 3.0, 4.0];
        let expected = vec![
            10.0, 49.0, 142.0, 313.0, 586.0, 985.0, 1534.0, 2257.0, 3178.0, 4321.0, 5710.0, 7369.0,
            9322.0, 11593.0, 14206.0, 17185.0,
        ];
        let y = eval_vectorized(&c, &points(1..=16), None).unwrap();
        assert_eq!(y, expected);
    }

    #[test]
    fn test_full_bias() {
        let c = [1.0, 2.0, 3.0];
        let x = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];

        let expected = vec![1.0, 3.0, 11.0];

        assert_eq!(eval(&c, &x, Some(&b)).unwrap(), expected);
        assert_eq!(eval_scalar(&c, &x, Some(&b)).unwrap(), expected);
        assert_eq!(eval_vectorized(&c, &x, Some(&b)).unwrap(), expected);
    }

    #[test]
    fn test_oversized_bias_rejected_on_every_path() {
        let c = [1.0, 2.0, 3.0];
        let x = [1.0, 2.0, 3.0];
        let b = [0.0, 1.0, 3.0];
        let expected = PolyEvalError::InvalidBiasLength {
            bias_len: 3,
            coeff_len: 3,
        };

        assert_eq!(eval(&c, &x, Some(&b)), Err(expected.clone()));
        assert_eq!(eval_scalar(&c, &x, Some(&b)), Err(expected.clone()));
        assert_eq!(eval_vectorized(&c, &x, Some(&b)), Err(expected.clone()));
        assert_eq!(
            eval_with_backend(&c, &x, Some(&b), Backend::Scalar),
            Err(expected)
        );
    }

    #[test]
    fn test_short_bias_is_zero_padded_at_high_end() {
        let c = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [3.0, 4.0, 5.0];
        let expected = vec![
            -201.0, -79.0, 1.0, 3.0, 11.0, 229.0, 981.0, 2711.0, 5983.0, 11481.0, 20009.0, 32491.0,
            49971.0, 73613.0,
        ];

        let x = points(1..=14);

        assert_eq!(eval_scalar(&c, &x, Some(&b)).unwrap(), expected);
        assert_eq!(eval_vectorized(&c, &x, Some(&b)).unwrap(), expected);

        let mut odd = expected.clone();
        odd.push(104701.0);
        assert_eq!(eval(&c, &points(1..=15), Some(&b)).unwrap(), odd);
    }

    #[test]
    fn test_full_bias_even_and_odd_batches() {
        let c = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [3.0, 4.0, 5.0, 6.0];
        let expected = vec![
            1.0, 3.0, 11.0, 49.0, 261.0, 911.0, 2383.0, 5181.0, 9929.0, 17371.0, 28371.0, 43913.0,
            65101.0, 93159.0, 129431.0, 175381.0,
        ];

        assert_eq!(
            eval_vectorized(&c, &points(3..=18), Some(&b)).unwrap(),
            expected
        );
        assert_eq!(
            eval_vectorized(&c, &points(3..=17), Some(&b)).unwrap(),
            expected[..15]
        );
    }

    #[test]
    fn test_strategy_resolution() {
        assert_eq!(Strategy::Scalar.resolve(), Strategy::Scalar);
        assert_eq!(Strategy::Vectorized.resolve(), Strategy::Vectorized);
        assert_eq!(Strategy::Auto.resolve(), Strategy::select());
        assert_ne!(Strategy::Auto.resolve(), Strategy::Auto);
    }

    #[test]
    fn test_strategy_eval_matches_free_functions() {
        let c = [2.0, -1.0, 0.5];
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let b = [1.0];

        assert_eq!(
            Strategy::Scalar.eval(&c, &x, Some(&b)),
            eval_scalar(&c, &x, Some(&b))
        );
        assert_eq!(
            Strategy::Vectorized.eval(&c, &x, Some(&b)),
            eval_vectorized(&c, &x, Some(&b))
        );
        let dispatched = eval(&c, &x, Some(&b));
        assert_eq!(Strategy::Auto.eval(&c, &x, Some(&b)), dispatched);
    }

    #[test]
    fn test_explicit_scalar_backend() {
        let c = [1.0, 2.0, 3.0];
        let x = [1.0, 2.0, 3.0];
        let y = eval_with_backend(&c, &x, Some(&[1.0, 2.0]), Backend::Scalar).unwrap();
        assert_eq!(y, vec![1.0, 3.0, 11.0]);
    }

    #[test]
    fn test_explicit_auto_backend_matches_vectorized() {
        let c = [1.0, 2.0, 3.0, 4.0];
        let x = points(1..=11);
        assert_eq!(
            eval_with_backend(&c, &x, None, Backend::Auto),
            eval_vectorized(&c, &x, None)
        );
    }

    #[test]
    fn test_unavailable_backend_rejected() {
        #[cfg(target_arch = "x86_64")]
        let foreign = Backend::NEON;
        #[cfg(not(target_arch = "x86_64"))]
        let foreign = Backend::AVX2;

        assert_eq!(
            eval_with_backend(&[1.0], &[1.0], None, foreign),
            Err(PolyEvalError::UnsupportedBackend(foreign))
        );
    }

    #[test]
    fn test_resolve_backend() {
        assert_eq!(resolve_backend(Backend::Auto), Ok(detected_backend()));
        assert_eq!(resolve_backend(Backend::Scalar), Ok(Backend::Scalar));
    }

    #[test]
    fn test_non_finite_points_propagate() {
        let c = [1.0, 2.0, 3.0];
        let x = [f64::NAN, f64::INFINITY, 1.0, f64::NAN, 2.0];
        let scalar = eval_scalar(&c, &x, None).unwrap();
        let vector = eval_vectorized(&c, &x, None).unwrap();

        assert!(scalar[0].is_nan() && vector[0].is_nan());
        assert_eq!(scalar[1], f64::INFINITY);
        assert_eq!(vector[1], f64::INFINITY);
        assert_eq!(scalar[2], 6.0);
        assert_eq!(vector[2], 6.0);
        assert!(scalar[3].is_nan() && vector[3].is_nan());
        assert_eq!(scalar[4], vector[4]);
    }
}
