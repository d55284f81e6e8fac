//! polyeval: Biased Horner Polynomial Evaluation on Scalar and SIMD Backends
//!
//! **polyeval** evaluates polynomials written in nested (Horner) form with a
//! per-level bias offset,
//!
//! ```text
//! p(x) = c0 + (x - b0)(c1 + (x - b1)(c2 + ... + (x - b[n-2]) c[n-1]))
//! ```
//!
//! over a batch of points. Two interchangeable strategies are provided:
//!
//! 1. **Scalar** - the portable reference, one point at a time
//! 2. **Vectorized** - SSE2/AVX/AVX2/AVX-512 (x86_64), NEON (AArch64) or
//!    SIMD128 (WASM) lane groups, with a scalar tail for leftover points
//!
//! # Design Principles
//!
//! - **Runtime dispatch**: Auto-select the widest backend the CPU supports,
//!   detected once per process
//! - **Zero unsafe in public API**: `unsafe` isolated in backends
//! - **Lane-exact results**: SIMD lanes round exactly like the scalar path
//!
//! # Quick Start
//!
//! ```rust
//! use polyeval::{eval, eval_scalar, eval_vectorized};
//!
//! let c = [1.0, 2.0, 3.0, 4.0]; // 1 + 2x + 3x^2 + 4x^3
//! let x = [1.0, 2.0, 3.0];
//!
//! assert_eq!(eval(&c, &x, None).unwrap(), vec![10.0, 49.0, 142.0]);
//! assert_eq!(
//!     eval_scalar(&c, &x, None).unwrap(),
//!     eval_vectorized(&c, &x, None).unwrap()
//! );
//!
//! // 1 + (x - 1)(2 + 3(x - 2))
//! let biased = eval(&[1.0, 2.0, 3.0], &x, Some(&[1.0, 2.0])).unwrap();
//! assert_eq!(biased, vec![1.0, 3.0, 11.0]);
//! ```

use std::sync::OnceLock;

pub mod backends;
pub mod bias;
pub mod error;
pub mod eval;
pub mod polynomial;

pub use error::{PolyEvalError, Result};
pub use eval::{eval, eval_scalar, eval_vectorized, eval_with_backend, Strategy};
pub use polynomial::Polynomial;

/// Backend execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Scalar fallback (no SIMD)
    Scalar,
    /// SSE2 (x86_64 baseline)
    SSE2,
    /// AVX (256-bit)
    AVX,
    /// AVX2 (256-bit with FMA)
    AVX2,
    /// AVX-512 (512-bit)
    AVX512,
    /// ARM NEON
    NEON,
    /// WebAssembly SIMD128
    WasmSIMD,
    /// Auto-select best available
    Auto,
}

impl Backend {
    /// Select the best available backend for the current platform
    ///
    /// This is a convenience wrapper around `detected_backend()`
    pub fn select_best() -> Self {
        detected_backend()
    }

    /// Number of f64 points one vector operation of this backend evaluates
    ///
    /// `Auto` reports the lane width of the detected backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyeval::Backend;
    ///
    /// assert_eq!(Backend::Scalar.lanes(), 1);
    /// assert_eq!(Backend::AVX2.lanes(), 4);
    /// assert_eq!(Backend::AVX512.lanes(), 8);
    /// ```
    pub fn lanes(self) -> usize {
        match self {
            Backend::Scalar => 1,
            Backend::SSE2 | Backend::NEON | Backend::WasmSIMD => 2,
            Backend::AVX | Backend::AVX2 => 4,
            Backend::AVX512 => 8,
            Backend::Auto => detected_backend().lanes(),
        }
    }

    /// Whether this backend evaluates more than one point per operation
    pub fn is_simd(self) -> bool {
        self.lanes() > 1
    }

    /// Whether this host can execute the backend
    ///
    /// `Scalar` and `Auto` are always available.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar | Backend::Auto => true,
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX => is_x86_feature_detected!("avx"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX2 => is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma"),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX512 => is_x86_feature_detected!("avx512f"),
            #[cfg(not(target_arch = "x86_64"))]
            Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512 => false,
            Backend::NEON => cfg!(all(target_arch = "aarch64", target_feature = "neon")),
            Backend::WasmSIMD => cfg!(all(target_arch = "wasm32", target_feature = "simd128")),
        }
    }
}

/// Detect best SIMD backend for x86_64 platforms
#[cfg(target_arch = "x86_64")]
fn detect_x86_backend() -> Backend {
    if is_x86_feature_detected!("avx512f") {
        return Backend::AVX512;
    }
    if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
        return Backend::AVX2;
    }
    if is_x86_feature_detected!("avx") {
        return Backend::AVX;
    }
    if is_x86_feature_detected!("sse2") {
        return Backend::SSE2;
    }
    Backend::Scalar
}

/// Detect best SIMD backend for ARM platforms
#[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
fn detect_arm_backend() -> Backend {
    // f64 vector lanes are AArch64-only
    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    {
        Backend::NEON
    }
    #[cfg(not(all(target_arch = "aarch64", target_feature = "neon")))]
    {
        Backend::Scalar
    }
}

/// Detect best SIMD backend for WebAssembly
#[cfg(target_arch = "wasm32")]
fn detect_wasm_backend() -> Backend {
    #[cfg(target_feature = "simd128")]
    {
        Backend::WasmSIMD
    }
    #[cfg(not(target_feature = "simd128"))]
    {
        Backend::Scalar
    }
}

/// Select the best available backend for the current platform
///
/// This function performs runtime CPU feature detection and selects the most
/// optimized backend available. The selection follows this priority:
///
/// **x86_64**:
/// 1. AVX-512 (if `avx512f` feature detected)
/// 2. AVX2 (if `avx2` and `fma` features detected)
/// 3. AVX (if `avx` feature detected)
/// 4. SSE2 (baseline for x86_64)
/// 5. Scalar (fallback)
///
/// **AArch64**: NEON (if available), else Scalar
///
/// **WASM**: SIMD128 (if available), else Scalar
///
/// **Other platforms**: Scalar
///
/// # Examples
///
/// ```
/// use polyeval::select_best_available_backend;
///
/// let backend = select_best_available_backend();
/// println!("Using backend: {:?}", backend);
/// ```
pub fn select_best_available_backend() -> Backend {
    #[cfg(target_arch = "x86_64")]
    {
        detect_x86_backend()
    }

    #[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
    {
        detect_arm_backend()
    }

    #[cfg(target_arch = "wasm32")]
    {
        detect_wasm_backend()
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "wasm32"
    )))]
    {
        Backend::Scalar
    }
}

static DETECTED_BACKEND: OnceLock<Backend> = OnceLock::new();

/// Backend chosen for this process, detected on first use and cached
///
/// The dispatcher consults this instead of re-running feature detection on
/// every call.
pub fn detected_backend() -> Backend {
    *DETECTED_BACKEND.get_or_init(|| {
        let backend = select_best_available_backend();
        #[cfg(feature = "tracing")]
        tracing::debug!(?backend, lanes = backend.lanes(), "detected SIMD backend");
        backend
    })
}

/// Lane width of the detected backend
pub fn lane_width() -> usize {
    detected_backend().lanes()
}
