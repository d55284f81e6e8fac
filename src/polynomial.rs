//! Polynomial type with multi-backend support

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::backends::scalar::horner_point;
use crate::bias::{align, normalize};
use crate::eval::{lanes_into, resolve_backend, scalar_points};
use crate::{Backend, Result};

/// Points handed to one rayon task by [`Polynomial::par_eval`]
///
/// A multiple of every backend lane width, so each chunk splits into whole
/// lane groups exactly where the sequential path would.
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 4096;

/// Biased Horner polynomial with its bias normalized once and a backend bound at creation
///
/// # Examples
///
/// ```
/// use polyeval::Polynomial;
///
/// // 1 + (x - 1)(2 + 3(x - 2))
/// let p = Polynomial::with_bias(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap();
/// assert_eq!(p.eval(&[1.0, 2.0, 3.0]), vec![1.0, 3.0, 11.0]);
/// assert_eq!(p.degree(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    /// Aligned bias: leading zero, then the normalized bias. Empty iff there are no coefficients.
    aligned_bias: Vec<f64>,
    backend: Backend,
}

impl Polynomial {
    /// Create an unbiased polynomial using the auto-selected backend
    ///
    /// # Examples
    ///
    /// ```
    /// use polyeval::Polynomial;
    ///
    /// let p = Polynomial::new(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(p.bias(), &[0.0, 0.0, 0.0]);
    /// ```
    pub fn new(coefficients: &[f64]) -> Self {
        let aligned_bias = if coefficients.is_empty() {
            Vec::new()
        } else {
            vec![0.0; coefficients.len()]
        };

        Self {
            coefficients: coefficients.to_vec(),
            aligned_bias,
            backend: crate::detected_backend(),
        }
    }

    /// Create a polynomial with per-level bias offsets
    ///
    /// Missing trailing offsets are zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PolyEvalError::InvalidBiasLength`] if `bias` has as many
    /// or more entries than `coefficients` (and `coefficients` is not empty).
    pub fn with_bias(coefficients: &[f64], bias: &[f64]) -> Result<Self> {
        Self::from_parts(coefficients, Some(bias))
    }

    /// Create a polynomial from coefficients and an optional bias
    ///
    /// # Errors
    ///
    /// Returns [`crate::PolyEvalError::InvalidBiasLength`] if `bias` has as many
    /// or more entries than `coefficients` (and `coefficients` is not empty).
    pub fn from_parts(coefficients: &[f64], bias: Option<&[f64]>) -> Result<Self> {
        if coefficients.is_empty() {
            return Ok(Self::new(coefficients));
        }

        let normalized = normalize(coefficients.len(), bias)?;
        Ok(Self {
            coefficients: coefficients.to_vec(),
            aligned_bias: align(&normalized),
            backend: crate::detected_backend(),
        })
    }

    /// Bind a specific backend (for benchmarking or testing)
    ///
    /// `Backend::Auto` resolves to the detected backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyeval::{Backend, Polynomial};
    ///
    /// let p = Polynomial::new(&[1.0, 2.0]).with_backend(Backend::Scalar).unwrap();
    /// assert_eq!(p.backend(), Backend::Scalar);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::PolyEvalError::UnsupportedBackend`] if this host cannot execute `backend`.
    pub fn with_backend(mut self, backend: Backend) -> Result<Self> {
        self.backend = resolve_backend(backend)?;
        Ok(self)
    }

    /// Coefficients, constant term first
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Normalized bias, one entry per nesting level (`len() - 1` entries)
    pub fn bias(&self) -> &[f64] {
        self.aligned_bias.get(1..).unwrap_or(&[])
    }

    /// Get the backend being used
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Polynomial degree, `None` for an empty coefficient list
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Check if the polynomial has no coefficients
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluate at every point, on the bound backend
    ///
    /// A SIMD backend runs the lane-group path; `Backend::Scalar` runs the
    /// scalar reference path.
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(coeffs = self.len(), points = x.len(), backend = ?self.backend)))]
    pub fn eval(&self, x: &[f64]) -> Vec<f64> {
        if self.backend.is_simd() {
            self.eval_vectorized(x)
        } else {
            self.eval_scalar(x)
        }
    }

    /// Evaluate at every point with the scalar reference path
    pub fn eval_scalar(&self, x: &[f64]) -> Vec<f64> {
        if self.is_empty() {
            return Vec::new();
        }
        scalar_points(&self.coefficients, self.bias(), x)
    }

    /// Evaluate at every point with the bound backend's lane-group kernel
    ///
    /// With `Backend::Scalar` bound the kernel is one lane wide.
    pub fn eval_vectorized(&self, x: &[f64]) -> Vec<f64> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut result = vec![0.0; x.len()];
        self.lanes_into(x, &mut result);
        result
    }

    /// Evaluate at a single point
    ///
    /// An empty polynomial is the zero polynomial.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyeval::Polynomial;
    ///
    /// assert_eq!(Polynomial::new(&[1.0, 2.0, 3.0, 4.0]).eval_at(2.0), 49.0);
    /// assert_eq!(Polynomial::new(&[]).eval_at(2.0), 0.0);
    /// ```
    pub fn eval_at(&self, x: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        horner_point(&self.coefficients, self.bias(), x)
    }

    /// Evaluate at every point on the rayon thread pool
    ///
    /// Results are identical to [`Polynomial::eval`].
    #[cfg(feature = "parallel")]
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(coeffs = self.len(), points = x.len())))]
    pub fn par_eval(&self, x: &[f64]) -> Vec<f64> {
        use rayon::prelude::*;

        if self.is_empty() {
            return Vec::new();
        }

        let mut result = vec![0.0; x.len()];
        result
            .par_chunks_mut(PARALLEL_CHUNK)
            .zip(x.par_chunks(PARALLEL_CHUNK))
            .for_each(|(out, points)| {
                if self.backend.is_simd() {
                    self.lanes_into(points, out);
                } else {
                    crate::backends::scalar::ScalarBackend::eval(
                        &self.coefficients,
                        self.bias(),
                        points,
                        out,
                    );
                }
            });
        result
    }

    /// Callers return early for an empty polynomial
    fn lanes_into(&self, x: &[f64], result: &mut [f64]) {
        lanes_into(
            self.backend,
            &self.coefficients,
            &self.aligned_bias,
            x,
            result,
        );
    }
}
