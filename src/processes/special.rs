//! Special functions used by the renewal-process distribution functions.
//!
//! - [`factorial`]: `x! = Γ(x + 1)` for real `x ≥ 0`.
//! - [`pochhammer`]: rising factorial `(a)_n = Γ(a + n) / Γ(a)`.
//! - [`factorial_ratio`]: `n! / (a)_n`, the survival term of the base law.
//!
//! Integral orders use exact products (and `statrs`' cached factorial table);
//! fractional orders go through log-gamma to stay finite for large `a`.
use statrs::function::{factorial as sf_factorial, gamma};

/// Largest integral order evaluated through the exact product path.
const MAX_EXACT_ORDER: f64 = 170.0;

fn is_small_integer(x: f64) -> bool {
    x.fract() == 0.0 && (0.0..=MAX_EXACT_ORDER).contains(&x)
}

/// `x! = Γ(x + 1)` for real `x ≥ 0`.
pub fn factorial(x: f64) -> f64 {
    if is_small_integer(x) {
        sf_factorial::factorial(x as u64)
    } else {
        gamma::gamma(x + 1.0)
    }
}

/// Rising factorial (Pochhammer symbol) `(a)_n = a (a + 1) … (a + n − 1)`.
///
/// For fractional `n` the gamma-ratio form `Γ(a + n) / Γ(a)` is evaluated in
/// log space; this requires `a > 0`.
pub fn pochhammer(a: f64, n: f64) -> f64 {
    if is_small_integer(n) {
        (0..n as u64).map(|k| a + k as f64).product()
    } else {
        (gamma::ln_gamma(a + n) - gamma::ln_gamma(a)).exp()
    }
}

/// `n! / (a)_n`, computed without forming either factor when `n` is
/// fractional.
///
/// For `a = i + 1` this equals `n! i! / (i + n)!`, i.e. `1 − F(i)` for the
/// renewal base law.
pub fn factorial_ratio(n: f64, a: f64) -> f64 {
    if is_small_integer(n) {
        (1..=n as u64).map(|k| k as f64 / (a + (k - 1) as f64)).product()
    } else {
        (gamma::ln_gamma(n + 1.0) + gamma::ln_gamma(a) - gamma::ln_gamma(a + n)).exp()
    }
}
