//! processes::traits — the generation contract shared by every simulator.
//!
//! Purpose
//! -------
//! Define [`StochasticProcess`], the single seam through which the dataset
//! assembler, the Python bindings, and the tests drive a simulator.
//!
//! Key behaviors
//! -------------
//! - [`StochasticProcess::sample_path`] draws a path of a given length from an
//!   explicit, caller-owned random source.
//! - [`StochasticProcess::generate`] is the seeded convenience form: it builds
//!   a fresh [`ProcessRng`] via [`seeded_rng`] and delegates to `sample_path`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Implementors are immutable after construction; `sample_path` takes
//!   `&self` and never caches random state, so one instance may be reused
//!   concurrently with distinct random sources.
//! - The returned array always has exactly `n` entries; `n = 0` yields an
//!   empty array.
//! - Generation is infallible. All parameter validation happens in the
//!   implementors' constructors.
use ndarray::Array1;
use rand::Rng;

use crate::processes::rng::{ProcessRng, seeded_rng};

/// A parametric stochastic process that can emit sample paths.
pub trait StochasticProcess {
    /// Element type of a generated path (state index, indicator, or real).
    type State: Copy + Into<f64>;

    /// Draw a path of length `n` using the supplied random source.
    fn sample_path<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<Self::State>;

    /// Draw a path of length `n` from a generator seeded with `seed`
    /// (OS entropy when `None`).
    ///
    /// Two calls with the same `Some(seed)` return identical paths.
    fn generate(&self, n: usize, seed: Option<u64>) -> Array1<Self::State> {
        let mut rng: ProcessRng = seeded_rng(seed);
        self.sample_path(n, &mut rng)
    }

    /// [`generate`](Self::generate) followed by a lossless cast to `f64`.
    fn generate_f64(&self, n: usize, seed: Option<u64>) -> Array1<f64> {
        self.generate(n, seed).mapv(Into::into)
    }
}
