//! Horner evaluation of long polynomials against their closed forms
//!
//! Run with:
//! ```
//! cargo run --example precision
//! ```

use polyeval::eval;

fn main() {
    let x = 1.00001_f64;

    // 1 + x + ... + x^50 = (x^51 - 1) / (x - 1)
    let geometric = vec![1.0; 51];
    let result = eval(&geometric, &[x], None).expect("Example should not fail");
    let direct = (x.powi(51) - 1.0) / (x - 1.0);
    println!(
        "Geometric:   horner {}, closed form {}, error {:e}",
        result[0],
        direct,
        result[0] - direct
    );

    // 1 - x + x^2 - ... - x^99 = (1 - x^100) / (1 + x)
    let alternating: Vec<f64> = (0..100)
        .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    let result = eval(&alternating, &[x], None).expect("Example should not fail");
    let direct = (1.0 - x.powi(100)) / (1.0 + x);
    println!(
        "Alternating: horner {}, closed form {}, error {:e}",
        result[0],
        direct,
        result[0] - direct
    );
}
