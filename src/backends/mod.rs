//! Backend implementations of the biased Horner kernel for different SIMD instruction sets
//!
//! Every backend evaluates the same recurrence over a batch of points, a full
//! register of points at a time, and finishes any points that do not fill a
//! register with the scalar kernel.
//!
//! # Safety
//!
//! All `unsafe` code is isolated within backend implementations. The public API
//! remains 100% safe.
//!
//! # Backends
//!
//! - `scalar`: Portable baseline implementation (no SIMD, 1 lane)
//! - `sse2`: x86_64 baseline SIMD (128-bit, 2 x f64)
//! - `avx2`: x86_64 advanced SIMD (256-bit, 4 x f64)
//! - `avx512`: x86_64 maximum SIMD (512-bit, 8 x f64)
//! - `neon`: AArch64 SIMD (128-bit, 2 x f64)
//! - `wasm`: WebAssembly SIMD128 (2 x f64)
//!
//! # Numerical consistency
//!
//! Kernels use separate subtract, add and multiply instructions in the same
//! order as the scalar recurrence. No fused multiply-add is emitted, so every
//! lane rounds exactly like [`scalar::horner_point_aligned`].

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod avx2;

#[cfg(target_arch = "x86_64")]
pub mod avx512;

#[cfg(target_arch = "aarch64")]
pub mod neon;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

/// Backend trait for the lane-group Horner kernel
///
/// All backend implementations must implement this trait to ensure
/// consistent behavior across different SIMD instruction sets.
///
/// The kernel reads the *aligned* bias layout (see [`crate::bias`]):
/// `aligned_bias[j]` is the offset paired with `c[j]`, and `aligned_bias[0]`
/// is never read.
pub trait HornerBackend {
    /// Number of f64 points evaluated per vector operation
    const LANES: usize;

    /// Evaluate `c` with `aligned_bias` at every point of `x`, writing `result[i]` for `x[i]`
    ///
    /// # Safety
    ///
    /// - `c` must not be empty
    /// - `aligned_bias.len()` must equal `c.len()`
    /// - `result` must have length >= `x.len()`
    /// - the host must support the instruction set of the backend
    unsafe fn horner(c: &[f64], aligned_bias: &[f64], x: &[f64], result: &mut [f64]);
}
