//! SSE2 backend implementation (x86_64 baseline SIMD)
//!
//! This backend uses SSE2 intrinsics for 128-bit SIMD operations.
//! SSE2 is available on all x86_64 CPUs as a baseline requirement.
//!
//! # Performance
//!
//! Two f64 points per register. Coefficient and bias values are broadcast to
//! both lanes at every nesting level.
//!
//! # Safety
//!
//! All SSE2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::scalar::horner_point_aligned;
use super::HornerBackend;

/// SSE2 backend (128-bit SIMD for x86_64)
pub struct Sse2Backend;

impl HornerBackend for Sse2Backend {
    const LANES: usize = 2;

    #[target_feature(enable = "sse2")]
    // SAFETY: Pointer arithmetic and SIMD intrinsics are safe because:
    // 1. Loop bounds ensure `i + 2 <= len` before calling `.add(i)`
    // 2. `result` is at least as long as `x` (trait contract)
    // 3. `j < c.len() == aligned_bias.len()` for every broadcast
    // 4. Unaligned loads/stores used (_mm_loadu_pd/_mm_storeu_pd) - no alignment requirement
    unsafe fn horner(c: &[f64], aligned_bias: &[f64], x: &[f64], result: &mut [f64]) {
        let len = x.len();
        let n = c.len();
        let c0 = _mm_set1_pd(c[0]);
        let mut i = 0;

        // Process 2 points at a time (128-bit = 2 x f64)
        while i + 2 <= len {
            let vx = _mm_loadu_pd(x.as_ptr().add(i));
            let mut acc = _mm_setzero_pd();

            for j in (1..n).rev() {
                let vc = _mm_set1_pd(*c.get_unchecked(j));
                let vb = _mm_set1_pd(*aligned_bias.get_unchecked(j));
                acc = _mm_mul_pd(_mm_sub_pd(vx, vb), _mm_add_pd(vc, acc));
            }
            acc = _mm_add_pd(acc, c0);

            _mm_storeu_pd(result.as_mut_ptr().add(i), acc);
            i += 2;
        }

        // Handle remaining point with scalar code
        for j in i..len {
            result[j] = horner_point_aligned(c, aligned_bias, x[j]);
        }
    }
}
