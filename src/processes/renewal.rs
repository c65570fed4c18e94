//! Discrete-time renewal process with polynomially decaying gap law.
//!
//! Purpose
//! -------
//! Generate `{0, 1}` arrival indicators whose mixing rate is governed by a
//! single decay coefficient `n > 1` (Berbee, "Convergence rates in the strong
//! law for bounded mixing sequences", 1987). Gaps between arrivals follow the
//! base law
//!
//! ```text
//! F(i) = 1 − n! i! / (i + n)! = 1 − n! / (i + 1)_n,
//! ```
//!
//! whose tail `P(X > i) ~ n! i^{−n}` decays polynomially.
//!
//! Key behaviors
//! -------------
//! - [`Renewal::new`] validates `n`, selects the truncation bounds
//!   `(lim_f, lim_x_zero)` and builds both inverse-CDF tables once.
//! - The first gap follows the stationary delay law [`Renewal::cdf_x_zero`];
//!   every later gap follows `F` itself ([`Renewal::cdf_f`]).
//! - Gaps are drawn by inverse-transform sampling: a uniform draw in
//!   `[0, 0.999999)` is located in a monotone breakpoint table by binary
//!   search ([`InverseCdfTable::digitize`]).
//! - [`ClosedFormRenewal`] inverts the `n = 3` laws algebraically instead of
//!   by table lookup. It consumes the same uniforms and matches the table
//!   sampler in distribution.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n` is finite and `> 1`.
//! - Both breakpoint tables are non-decreasing, so digitize is well defined.
//! - `cdf_f(0) = 0`, hence every gap after the first is at least 1 and the
//!   arrival times are strictly increasing from the second one on.
//! - The uniforms are capped at [`UNIFORM_UPPER`]; the truncation bounds are
//!   chosen so both tables resolve probability mass up to that cap for
//!   `n ∈ {2, 3, 4, 5}`. Other values share the `n ≥ 6` bounds.
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation, bound selection, CDF values against the
//!   closed forms for `n = 2, 3`, table monotonicity, digitize edge cases,
//!   output range/determinism, and the table vs closed-form arrival rate.
use ndarray::Array1;
use rand::Rng;

use crate::processes::{
    errors::ProcessResult, special::factorial_ratio, traits::StochasticProcess,
    validation::verify_decay_coefficient,
};

/// Exclusive upper bound of the uniform draws fed to the inverse CDFs.
pub const UNIFORM_UPPER: f64 = 0.999999;

/// `InverseCdfTable` — monotone breakpoints `cdf(0), cdf(1), …, cdf(len − 1)`.
///
/// Lookup returns the smallest index `i` with `u < cdf(i)`, or `len` when `u`
/// is at or above every breakpoint (the truncation point).
#[derive(Debug, Clone, PartialEq)]
pub struct InverseCdfTable {
    breakpoints: Array1<f64>,
}

impl InverseCdfTable {
    /// Tabulate `cdf` on `0..len`.
    pub fn tabulate(len: usize, cdf: impl Fn(f64) -> f64) -> Self {
        let breakpoints = Array1::from_shape_fn(len, |i| cdf(i as f64));
        debug_assert!(
            breakpoints.windows(2).into_iter().all(|w| w[0] <= w[1]),
            "inverse-CDF breakpoints must be non-decreasing"
        );
        InverseCdfTable { breakpoints }
    }

    /// Smallest `i` such that `u < cdf(i)`.
    pub fn digitize(&self, u: f64) -> usize {
        match self.breakpoints.as_slice() {
            Some(slice) => slice.partition_point(|&c| c <= u),
            None => self.breakpoints.iter().take_while(|&&c| c <= u).count(),
        }
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Whether the table has no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Breakpoint values.
    pub fn breakpoints(&self) -> &Array1<f64> {
        &self.breakpoints
    }
}

/// Truncation bounds `(lim_f, lim_x_zero)` for decay coefficient `n`.
///
/// Exact bounds exist for `n ∈ {2, 3, 4, 5}`; every other admissible `n`
/// shares the `n ≥ 6` pair.
pub fn truncation_bounds(n: f64) -> (usize, usize) {
    if n == 2.0 {
        (1413, 999_998)
    } else if n == 3.0 {
        (180, 1412)
    } else if n == 4.0 {
        (68, 179)
    } else if n == 5.0 {
        (39, 67)
    } else {
        (27, 38)
    }
}

/// `Renewal` — table-based renewal-process sampler.
///
/// Fields
/// ------
/// - `n`: decay coefficient.
/// - `lim_f`, `lim_x_zero`: truncation bounds of the two tables.
/// - `table_f`: breakpoints of `cdf_f` on `0..lim_f`.
/// - `table_x_zero`: breakpoints of `cdf_x_zero` on `0..lim_x_zero`.
///
/// Performance
/// -----------
/// - Construction is `O(lim_x_zero · n)`; for `n = 2` the first-gap table has
///   about one million entries (8 MB). Sampling is `O(N log lim)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Renewal {
    n: f64,
    lim_f: usize,
    lim_x_zero: usize,
    table_f: InverseCdfTable,
    table_x_zero: InverseCdfTable,
}

impl Renewal {
    /// Construct a renewal process with decay coefficient `n`.
    ///
    /// # Errors
    /// - [`ProcessError::InvalidDecayCoefficient`] unless `n` is finite and > 1.
    ///
    /// [`ProcessError::InvalidDecayCoefficient`]: crate::processes::errors::ProcessError::InvalidDecayCoefficient
    pub fn new(n: f64) -> ProcessResult<Self> {
        let n = verify_decay_coefficient(n)?;
        let (lim_f, lim_x_zero) = truncation_bounds(n);

        let table_f = InverseCdfTable::tabulate(lim_f, |i| cdf_f(n, i));
        let table_x_zero = InverseCdfTable::tabulate(lim_x_zero, |i| cdf_x_zero(n, i));
        tracing::debug!(n, lim_f, lim_x_zero, "built renewal inverse-CDF tables");

        Ok(Renewal { n, lim_f, lim_x_zero, table_f, table_x_zero })
    }

    /// Decay coefficient `n`.
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Truncation bound of the subsequent-gap table.
    pub fn lim_f(&self) -> usize {
        self.lim_f
    }

    /// Truncation bound of the first-gap table.
    pub fn lim_x_zero(&self) -> usize {
        self.lim_x_zero
    }

    /// Distribution function of the first gap (stationary delay):
    /// `1 − n!/(i + 1)_n · (i + 1)/n`.
    pub fn cdf_x_zero(&self, i: f64) -> f64 {
        cdf_x_zero(self.n, i)
    }

    /// Distribution function of every subsequent gap: `F(i) = 1 − n!/(i + 1)_n`.
    pub fn cdf_f(&self, i: f64) -> f64 {
        cdf_f(self.n, i)
    }

    /// Breakpoint table used for subsequent gaps.
    pub fn table_f(&self) -> &InverseCdfTable {
        &self.table_f
    }

    /// Breakpoint table used for the first gap.
    pub fn table_x_zero(&self) -> &InverseCdfTable {
        &self.table_x_zero
    }
}

impl StochasticProcess for Renewal {
    type State = u8;

    fn sample_path<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<u8> {
        let uniforms = draw_uniforms(n, rng);
        let gaps = uniforms.iter().enumerate().map(|(k, &u)| {
            if k == 0 { self.table_x_zero.digitize(u) } else { self.table_f.digitize(u) }
        });
        arrival_indicators(n, gaps)
    }
}

/// `ClosedFormRenewal` — `n = 3` renewal sampler with algebraic inverse CDFs.
///
/// For `n = 3` the laws reduce to
///
/// ```text
/// F(i)      = 1 − 6 / ((i + 1)(i + 2)(i + 3))
/// F_X0(i)   = (i + 1)(i + 4) / ((i + 2)(i + 3))
/// ```
///
/// which invert through a quadratic root (first gap) and Cardano's formula
/// (subsequent gaps). There is no truncation, so very rare long gaps are not
/// capped as they are by [`Renewal`]'s tables. Kept as a faster reference for
/// the table sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClosedFormRenewal;

impl ClosedFormRenewal {
    /// Construct the `n = 3` closed-form sampler.
    pub fn new() -> Self {
        ClosedFormRenewal
    }

    /// Inverse of the first-gap law, rounded up to the next integer.
    pub fn inverse_cdf_x_zero(&self, j: f64) -> usize {
        let root = (-5.0 * j - ((j - 9.0) * (j - 1.0)).sqrt() + 5.0) / (2.0 * (j - 1.0));
        ceil_to_index(root)
    }

    /// Inverse of `F`, rounded up to the next integer.
    pub fn inverse_cdf_f(&self, j: f64) -> usize {
        let jm1 = j - 1.0;
        let t = (-3.0 + 729.0 / (jm1 * jm1)).sqrt();
        let root = -2.0 - (t / 9.0 + 3.0 / jm1).cbrt() - (jm1 / (3.0 * t * jm1 + 81.0)).cbrt();
        ceil_to_index(root)
    }
}

impl StochasticProcess for ClosedFormRenewal {
    type State = u8;

    fn sample_path<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<u8> {
        let uniforms = draw_uniforms(n, rng);
        let gaps = uniforms.iter().enumerate().map(|(k, &u)| {
            if k == 0 { self.inverse_cdf_x_zero(u) } else { self.inverse_cdf_f(u) }
        });
        arrival_indicators(n, gaps)
    }
}

// ---- Helpers ----

fn cdf_f(n: f64, i: f64) -> f64 {
    1.0 - factorial_ratio(n, i + 1.0)
}

fn cdf_x_zero(n: f64, i: f64) -> f64 {
    1.0 - factorial_ratio(n, i + 1.0) * (i + 1.0) / n
}

fn draw_uniforms<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(0.0..UNIFORM_UPPER)).collect()
}

/// `ceil(x)` clamped at zero; `x` is `-1` only at `j = 0` for the first gap.
fn ceil_to_index(x: f64) -> usize {
    let c = x.ceil();
    if c.is_finite() && c > 0.0 { c as usize } else { 0 }
}

/// Mark every index in `0..n` that equals a partial sum of `gaps`.
///
/// Every partial sum counts, including a first gap of zero, so index 0 is an
/// arrival whenever the delayed first gap is zero. Table and closed-form
/// sampling share this rule.
fn arrival_indicators(n: usize, gaps: impl Iterator<Item = usize>) -> Array1<u8> {
    let mut out = Array1::<u8>::zeros(n);
    let mut arrival = 0usize;
    for gap in gaps {
        arrival = arrival.saturating_add(gap);
        if arrival >= n {
            break;
        }
        out[arrival] = 1;
    }
    out
}
