//! processes — parametric stochastic-process simulators.
//!
//! Purpose
//! -------
//! Provide seeded, reproducible sample-path generators for four processes
//! with controlled dependence structure, plus the registry that maps process
//! names to validated simulators.
//!
//! Key behaviors
//! -------------
//! - [`TwoStateMarkovChain`]: binary chain with switching probabilities
//!   `(p, q)`.
//! - [`AR1`]: Gaussian first-order autoregression with coefficient `φ`.
//! - [`CycleRandomWalk`]: lazy walk on a ring with move probabilities
//!   `(b, s, f)`.
//! - [`Renewal`]: arrival indicators of a renewal process with polynomial
//!   gap tails, sampled by table-based inverse CDF; [`ClosedFormRenewal`] is
//!   the algebraic `n = 3` variant.
//! - [`StochasticProcess`] is the shared contract (`generate` /
//!   `sample_path`); [`ProcessSpec`] / [`Process`] provide name-based
//!   construction and dispatch.
//!
//! Invariants & assumptions
//! ------------------------
//! - All parameter validation happens in constructors and is reported as
//!   [`ProcessError`]; generation never fails.
//! - Simulators are immutable after construction. Each `generate` call owns
//!   its random source ([`seeded_rng`]), so equal seeds reproduce paths
//!   bit-for-bit and instances can be shared across threads.
//! - Internal post-conditions (stochastic matrices, output ranges) are
//!   `debug_assert!`s and indicate programming errors if they fire.
//!
//! Conventions
//! -----------
//! - Paths are `ndarray::Array1` values; index 0 is the oldest observation.
//! - Discrete processes return their natural integer types (`u8`, `u32`);
//!   [`StochasticProcess::generate_f64`] and [`Process::generate_f64`] cast
//!   losslessly to `f64`.
//! - This subtree performs no I/O. Only renewal table construction emits a
//!   `tracing` debug event.
//!
//! Testing notes
//! -------------
//! - Every simulator module carries unit tests for validation, exact
//!   structural properties, determinism, and a statistical sanity check.
//! - Property-based invariants live in `tests/proptest_processes.rs`.

pub mod ar1;
pub mod cycle_walk;
pub mod errors;
pub mod markov;
pub mod registry;
pub mod renewal;
pub mod rng;
pub mod special;
pub mod traits;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::ar1::AR1;
pub use self::cycle_walk::CycleRandomWalk;
pub use self::errors::{ProcessError, ProcessResult};
pub use self::markov::TwoStateMarkovChain;
pub use self::registry::{Process, ProcessKind, ProcessSpec, UnknownProcessName};
pub use self::renewal::{ClosedFormRenewal, InverseCdfTable, Renewal};
pub use self::rng::{ProcessRng, seeded_rng};
pub use self::traits::StochasticProcess;

pub mod prelude {
    pub use super::errors::{ProcessError, ProcessResult};
    pub use super::registry::{Process, ProcessKind, ProcessSpec};
    pub use super::traits::StochasticProcess;
    pub use super::{AR1, ClosedFormRenewal, CycleRandomWalk, Renewal, TwoStateMarkovChain};
}
