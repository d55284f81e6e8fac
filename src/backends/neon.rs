//! ARM NEON backend implementation (AArch64 128-bit SIMD)
//!
//! This backend uses AArch64 NEON intrinsics for 128-bit SIMD operations.
//! Double-precision vector lanes only exist on AArch64, so 32-bit ARM hosts
//! use the scalar backend.
//!
//! # Performance
//!
//! Two f64 points per register, similar to SSE2 on x86_64.
//!
//! # Safety
//!
//! All NEON intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::scalar::horner_point_aligned;
use super::HornerBackend;

/// ARM NEON backend (128-bit SIMD)
pub struct NeonBackend;

impl HornerBackend for NeonBackend {
    const LANES: usize = 2;

    #[target_feature(enable = "neon")]
    // SAFETY: Pointer arithmetic and SIMD intrinsics are safe because:
    // 1. Loop bounds ensure `i + 2 <= len` before calling `.add(i)`
    // 2. `result` is at least as long as `x` (trait contract)
    // 3. `j < c.len() == aligned_bias.len()` for every broadcast
    unsafe fn horner(c: &[f64], aligned_bias: &[f64], x: &[f64], result: &mut [f64]) {
        let len = x.len();
        let n = c.len();
        let c0 = vdupq_n_f64(c[0]);
        let mut i = 0;

        // Process 2 points at a time (128-bit = 2 x f64)
        while i + 2 <= len {
            let vx = vld1q_f64(x.as_ptr().add(i));
            let mut acc = vdupq_n_f64(0.0);

            for j in (1..n).rev() {
                let vc = vdupq_n_f64(*c.get_unchecked(j));
                let vb = vdupq_n_f64(*aligned_bias.get_unchecked(j));
                acc = vmulq_f64(vsubq_f64(vx, vb), vaddq_f64(vc, acc));
            }
            acc = vaddq_f64(acc, c0);

            vst1q_f64(result.as_mut_ptr().add(i), acc);
            i += 2;
        }

        // Handle remaining point with scalar code
        for j in i..len {
            result[j] = horner_point_aligned(c, aligned_bias, x[j]);
        }
    }
}
