//! Scalar (non-SIMD) backend implementation
//!
//! This is the portable baseline implementation that works on all platforms.
//! It provides the reference recurrence every SIMD backend must reproduce, and
//! the per-point tail kernel those backends fall back to.
//!
//! # Performance
//!
//! This backend provides correctness reference but no SIMD acceleration.

use super::HornerBackend;

/// Evaluate one point with the normalized bias layout (`bias[i - 1]` pairs with `c[i]`)
///
/// `c` must not be empty and `bias.len()` must be `c.len() - 1`.
#[inline]
pub fn horner_point(c: &[f64], bias: &[f64], x: f64) -> f64 {
    let mut y = 0.0;
    for i in (1..c.len()).rev() {
        y = (x - bias[i - 1]) * (c[i] + y);
    }
    y + c[0]
}

/// Evaluate one point with the aligned bias layout (`aligned_bias[j]` pairs with `c[j]`)
///
/// `c` must not be empty and `aligned_bias.len()` must be `c.len()`.
#[inline]
pub fn horner_point_aligned(c: &[f64], aligned_bias: &[f64], x: f64) -> f64 {
    let mut y = 0.0;
    for j in (1..c.len()).rev() {
        y = (x - aligned_bias[j]) * (c[j] + y);
    }
    y + c[0]
}

/// Scalar backend (portable, no SIMD)
pub struct ScalarBackend;

impl ScalarBackend {
    /// Evaluate every point with the normalized bias layout
    ///
    /// This is the reference path behind [`crate::eval_scalar`].
    pub fn eval(c: &[f64], bias: &[f64], x: &[f64], result: &mut [f64]) {
        for (out, &x_i) in result.iter_mut().zip(x) {
            *out = horner_point(c, bias, x_i);
        }
    }
}

impl HornerBackend for ScalarBackend {
    const LANES: usize = 1;

    // SAFETY: This function is safe because:
    // 1. All slice accesses are bounds-checked by Rust iterator/indexing
    // 2. No raw pointer arithmetic is performed
    // 3. Marked unsafe only to match HornerBackend trait interface
    unsafe fn horner(c: &[f64], aligned_bias: &[f64], x: &[f64], result: &mut [f64]) {
        for (out, &x_i) in result.iter_mut().zip(x) {
            *out = horner_point_aligned(c, aligned_bias, x_i);
        }
    }
}
