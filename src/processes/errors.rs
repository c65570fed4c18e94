//! Errors for stochastic-process construction.
//!
//! This module defines [`ProcessError`], the single error type returned by the
//! simulator constructors in [`crate::processes`]. Every variant is raised
//! synchronously at construction time; sequence generation itself has no
//! recoverable failure path.
//!
//! ## Conventions
//! - Probabilities must be **finite** and lie in the closed interval `[0, 1]`.
//! - The cycle-walk probabilities `(b, s, f)` must sum to one within `1e-12`.
//! - The renewal decay coefficient must be **finite** and strictly greater
//!   than one.
//! - Distribution-constructor failures from `rand` are normalized into
//!   [`ProcessError::InvalidDistribution`] with a human-readable reason.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use rand::distributions::{BernoulliError, WeightedError};

/// Result alias for simulator construction paths that may produce
/// [`ProcessError`].
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Unified error type for stochastic-process construction.
///
/// Covers probability range checks, the cycle-walk normalization condition,
/// decay-coefficient checks for the renewal process, and graph-size checks.
/// Implements `Display`/`Error` and converts to a Python `ValueError` at
/// PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessError {
    // ---- Probability validation ----
    /// A transition probability lies outside `[0, 1]` or is NaN.
    InvalidProbability { name: &'static str, value: f64 },

    /// Cycle-walk probabilities do not sum to one.
    ProbabilitiesDoNotSumToOne { sum: f64 },

    // ---- Model parameters ----
    /// A real-valued coefficient is NaN/±inf.
    NonFiniteParameter { name: &'static str, value: f64 },

    /// Renewal decay coefficient must be finite and > 1.
    InvalidDecayCoefficient { value: f64 },

    /// Cycle graph must have at least one vertex.
    InvalidVertexCount { vertices: usize },

    /// Cycle graph is too large for its dense transition matrix.
    TooManyVertices { vertices: usize, max: usize },

    // ---- rand distribution errors ----
    /// Wrapper for `rand::distributions::{BernoulliError, WeightedError}`.
    InvalidDistribution { reason: String },
}

impl std::error::Error for ProcessError {}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessError::InvalidProbability { name, value } => {
                write!(f, "{name} must be between zero and one; got: {value}")
            }
            ProcessError::ProbabilitiesDoNotSumToOne { sum } => {
                write!(f, "Probabilities must sum up to one; got sum: {sum}")
            }
            ProcessError::NonFiniteParameter { name, value } => {
                write!(f, "{name} must be finite; got: {value}")
            }
            ProcessError::InvalidDecayCoefficient { value } => {
                write!(f, "Decay coefficient n must be finite and > 1; got: {value}")
            }
            ProcessError::InvalidVertexCount { vertices } => {
                write!(f, "Cycle graph needs at least one vertex; got: {vertices}")
            }
            ProcessError::TooManyVertices { vertices, max } => {
                write!(f, "Cycle graph supports at most {max} vertices; got: {vertices}")
            }
            ProcessError::InvalidDistribution { reason } => {
                write!(f, "Invalid sampling distribution: {reason}")
            }
        }
    }
}

/// Convert a [`ProcessError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ProcessError> for PyErr {
    fn from(err: ProcessError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<BernoulliError> for ProcessError {
    fn from(err: BernoulliError) -> ProcessError {
        ProcessError::InvalidDistribution { reason: err.to_string() }
    }
}

impl From<WeightedError> for ProcessError {
    fn from(err: WeightedError) -> ProcessError {
        ProcessError::InvalidDistribution { reason: err.to_string() }
    }
}
