//! Example demonstrating runtime CPU feature detection
//!
//! Run with:
//! ```
//! cargo run --example backend_detection
//! ```

use polyeval::{
    detected_backend, eval_scalar, eval_vectorized, lane_width, select_best_available_backend,
    Backend, Polynomial, Strategy,
};

fn main() {
    println!("polyeval Backend Detection Example");
    println!("==================================\n");

    let backend = select_best_available_backend();
    println!("Auto-detected backend: {:?}", backend);
    println!("Cached backend:        {:?}", detected_backend());
    println!("Lane width (f64):      {}", lane_width());
    println!("Dispatcher strategy:   {:?}", Strategy::select());

    #[cfg(target_arch = "x86_64")]
    {
        println!("\nx86_64 CPU Features:");
        println!("  SSE2:    {}", is_x86_feature_detected!("sse2"));
        println!("  AVX:     {}", is_x86_feature_detected!("avx"));
        println!("  AVX2:    {}", is_x86_feature_detected!("avx2"));
        println!("  FMA:     {}", is_x86_feature_detected!("fma"));
        println!("  AVX512F: {}", is_x86_feature_detected!("avx512f"));
    }

    println!("\nBackend Selection Priority:");
    println!("  x86_64:  AVX-512 -> AVX2+FMA -> AVX -> SSE2 -> Scalar");
    println!("  AArch64: NEON -> Scalar");
    println!("  WASM:    SIMD128 -> Scalar");

    println!("\nAvailable backends on this host:");
    for candidate in [
        Backend::Scalar,
        Backend::SSE2,
        Backend::AVX,
        Backend::AVX2,
        Backend::AVX512,
        Backend::NEON,
        Backend::WasmSIMD,
    ] {
        if candidate.is_available() {
            println!("  {:?} ({} lanes)", candidate, candidate.lanes());
        }
    }

    // 1 + (x - 3)(2 + (x - 4)(3 + (x - 5)(4 + 5x)))
    let c = [1.0, 2.0, 3.0, 4.0, 5.0];
    let b = [3.0, 4.0, 5.0];
    let x: Vec<f64> = (1..=15).map(f64::from).collect();

    println!("\nBackend Transparency:");
    let scalar = eval_scalar(&c, &x, Some(&b)).expect("Example should not fail");
    let vectorized = eval_vectorized(&c, &x, Some(&b)).expect("Example should not fail");
    println!("  scalar:     {:?}", scalar);
    println!("  vectorized: {:?}", vectorized);
    println!("  identical:  {}", scalar == vectorized);

    let p = Polynomial::with_bias(&c, &b)
        .and_then(|p| p.with_backend(Backend::Scalar))
        .expect("Example should not fail");
    println!(
        "  Polynomial bound to {:?}: p(15) = {}",
        p.backend(),
        p.eval_at(15.0)
    );
}
