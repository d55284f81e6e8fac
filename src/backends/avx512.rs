//! AVX-512 backend implementation (x86_64 advanced SIMD)
//!
//! This backend uses AVX-512 intrinsics for 512-bit SIMD operations.
//! AVX-512 is available on Intel Skylake-X/Sapphire Rapids (2017+) and AMD Zen 4 (2022+) CPUs.
//!
//! # Performance
//!
//! Eight f64 points per register, 2x the AVX2 width.
//!
//! # Safety
//!
//! All AVX-512 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::scalar::horner_point_aligned;
use super::HornerBackend;

/// AVX-512 backend (512-bit SIMD for x86_64)
pub struct Avx512Backend;

impl HornerBackend for Avx512Backend {
    const LANES: usize = 8;

    #[target_feature(enable = "avx512f")]
    // SAFETY: Pointer arithmetic and SIMD intrinsics are safe because:
    // 1. Loop bounds ensure `i + N <= len` before calling `.add(i)` (N=8 for f64 on AVX-512)
    // 2. All pointers derived from valid slice references with sufficient backing storage
    // 3. AVX-512 intrinsics marked with #[target_feature(enable = "avx512f")]
    // 4. Unaligned loads/stores used (_mm512_loadu_pd/_mm512_storeu_pd) - no alignment requirement
    unsafe fn horner(c: &[f64], aligned_bias: &[f64], x: &[f64], result: &mut [f64]) {
        let len = x.len();
        let n = c.len();
        let c0 = _mm512_set1_pd(c[0]);
        let mut i = 0;

        // Process 8 points at a time (512-bit = 8 x f64)
        while i + 8 <= len {
            let vx = _mm512_loadu_pd(x.as_ptr().add(i));
            let mut acc = _mm512_setzero_pd();

            for j in (1..n).rev() {
                let vc = _mm512_set1_pd(*c.get_unchecked(j));
                let vb = _mm512_set1_pd(*aligned_bias.get_unchecked(j));
                acc = _mm512_mul_pd(_mm512_sub_pd(vx, vb), _mm512_add_pd(vc, acc));
            }
            acc = _mm512_add_pd(acc, c0);

            _mm512_storeu_pd(result.as_mut_ptr().add(i), acc);
            i += 8;
        }

        // Handle remaining points with scalar code
        for j in i..len {
            result[j] = horner_point_aligned(c, aligned_bias, x[j]);
        }
    }
}
