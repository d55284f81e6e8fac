//! WebAssembly SIMD128 backend implementation
//!
//! This backend uses WebAssembly SIMD128 intrinsics for 128-bit SIMD operations.
//! SIMD128 is supported in modern browsers and wasm runtimes.
//!
//! # Performance
//!
//! Two f64 points per register, similar to SSE2 and NEON.
//!
//! # Safety
//!
//! All WASM SIMD intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "wasm32")]
use std::arch::wasm32::*;

use super::scalar::horner_point_aligned;
use super::HornerBackend;

/// WebAssembly SIMD128 backend (128-bit SIMD)
pub struct WasmBackend;

impl HornerBackend for WasmBackend {
    const LANES: usize = 2;

    #[target_feature(enable = "simd128")]
    // SAFETY: Pointer arithmetic and SIMD intrinsics are safe because:
    // 1. Loop bounds ensure `i + 2 <= len` before calling `.add(i)`
    // 2. `result` is at least as long as `x` (trait contract)
    // 3. `j < c.len() == aligned_bias.len()` for every broadcast
    // 4. v128_load/v128_store have no alignment requirement
    unsafe fn horner(c: &[f64], aligned_bias: &[f64], x: &[f64], result: &mut [f64]) {
        let len = x.len();
        let n = c.len();
        let c0 = f64x2_splat(c[0]);
        let mut i = 0;

        // Process 2 points at a time (128-bit = 2 x f64)
        while i + 2 <= len {
            let vx = v128_load(x.as_ptr().add(i) as *const v128);
            let mut acc = f64x2_splat(0.0);

            for j in (1..n).rev() {
                let vc = f64x2_splat(*c.get_unchecked(j));
                let vb = f64x2_splat(*aligned_bias.get_unchecked(j));
                acc = f64x2_mul(f64x2_sub(vx, vb), f64x2_add(vc, acc));
            }
            acc = f64x2_add(acc, c0);

            v128_store(result.as_mut_ptr().add(i) as *mut v128, acc);
            i += 2;
        }

        // Handle remaining point with scalar code
        for j in i..len {
            result[j] = horner_point_aligned(c, aligned_bias, x[j]);
        }
    }
}
