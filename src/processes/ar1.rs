//! First-order autoregressive process `x_t = φ x_{t−1} + ε_t`, `ε_t ~ N(0, 1)`.
//!
//! The path starts at `x_0 = ε_0` (not from the stationary law), so for
//! `|φ| < 1` the first few observations carry a short transient. No range
//! restriction is placed on `φ`; explosive and unit-root paths are allowed.
use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::processes::{errors::ProcessResult, traits::StochasticProcess, validation::verify_finite};

/// AR(1) process with dependence coefficient `phi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AR1 {
    phi: f64,
}

impl AR1 {
    /// Construct an AR(1) process.
    ///
    /// # Errors
    /// - [`ProcessError::NonFiniteParameter`] if `phi` is NaN/±inf.
    ///
    /// [`ProcessError::NonFiniteParameter`]: crate::processes::errors::ProcessError::NonFiniteParameter
    pub fn new(phi: f64) -> ProcessResult<Self> {
        let phi = verify_finite("phi", phi)?;
        Ok(AR1 { phi })
    }

    /// Dependence coefficient `φ`.
    pub fn phi(&self) -> f64 {
        self.phi
    }
}

impl StochasticProcess for AR1 {
    type State = f64;

    fn sample_path<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        // Draw every innovation first so the stream layout matches a plain
        // i.i.d. normal sample of length n.
        let mut states: Array1<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
        for i in 1..n {
            states[i] += self.phi * states[i - 1];
        }
        states
    }
}
