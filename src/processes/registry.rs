//! processes::registry — name-to-simulator mapping.
//!
//! Purpose
//! -------
//! Turn a process name plus keyword parameters into a validated simulator
//! without stringly-typed dispatch past the parsing boundary.
//!
//! Key behaviors
//! -------------
//! - [`ProcessKind`] is the tag: it parses from the canonical names
//!   (`"ar1"`, `"cycle_random_walk"`, `"renewal"`, `"two_state_markov_chain"`)
//!   and answers per-kind questions such as [`ProcessKind::is_discrete`]
//!   through exhaustive matches.
//! - [`ProcessSpec`] carries the tag together with its parameters. It is
//!   `serde`-deserializable with an internal `process` tag, so the same type
//!   backs JSON configuration and Python keyword arguments.
//! - [`Process`] holds a constructed simulator and dispatches generation to
//!   it, returning `f64` paths for downstream feature construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every [`Process`] value wraps a simulator that passed its constructor's
//!   validation; [`ProcessSpec::build`] is the only place parameters are
//!   checked.
//!
//! Conventions
//! -----------
//! - Unknown names surface as [`UnknownProcessName`], which the dataset layer
//!   maps to its invalid-argument error.
use std::{fmt, str::FromStr};

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::processes::{
    ar1::AR1,
    cycle_walk::CycleRandomWalk,
    errors::ProcessResult,
    markov::TwoStateMarkovChain,
    renewal::Renewal,
    traits::StochasticProcess,
};

/// Tag identifying one of the supported processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    Ar1,
    CycleRandomWalk,
    Renewal,
    TwoStateMarkovChain,
}

impl ProcessKind {
    /// All kinds, in name order.
    pub const ALL: [ProcessKind; 4] = [
        ProcessKind::Ar1,
        ProcessKind::CycleRandomWalk,
        ProcessKind::Renewal,
        ProcessKind::TwoStateMarkovChain,
    ];

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            ProcessKind::Ar1 => "ar1",
            ProcessKind::CycleRandomWalk => "cycle_random_walk",
            ProcessKind::Renewal => "renewal",
            ProcessKind::TwoStateMarkovChain => "two_state_markov_chain",
        }
    }

    /// Whether the process emits integer-valued (state or indicator) paths.
    ///
    /// Discrete paths are perturbed with negligible Gaussian noise before
    /// feature construction so that downstream quantiles are not tied.
    pub const fn is_discrete(self) -> bool {
        match self {
            ProcessKind::CycleRandomWalk | ProcessKind::Renewal | ProcessKind::TwoStateMarkovChain => {
                true
            }
            ProcessKind::Ar1 => false,
        }
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a process name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProcessName(pub String);

impl fmt::Display for UnknownProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stochastic process {} is not available.", self.0)
    }
}

impl std::error::Error for UnknownProcessName {}

impl FromStr for ProcessKind {
    type Err = UnknownProcessName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownProcessName(s.to_string()))
    }
}

/// `ProcessSpec` — a process tag together with its keyword parameters.
///
/// Serialized form (JSON):
///
/// ```json
/// {"process": "cycle_random_walk", "b": 0.2, "s": 0.5, "f": 0.3, "vertices": 5}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "process", rename_all = "snake_case", deny_unknown_fields)]
pub enum ProcessSpec {
    Ar1 { phi: f64 },
    CycleRandomWalk { b: f64, s: f64, f: f64, vertices: usize },
    Renewal { n: f64 },
    TwoStateMarkovChain { p: f64, q: f64 },
}

impl ProcessSpec {
    /// The tag of this specification.
    pub fn kind(&self) -> ProcessKind {
        match self {
            ProcessSpec::Ar1 { .. } => ProcessKind::Ar1,
            ProcessSpec::CycleRandomWalk { .. } => ProcessKind::CycleRandomWalk,
            ProcessSpec::Renewal { .. } => ProcessKind::Renewal,
            ProcessSpec::TwoStateMarkovChain { .. } => ProcessKind::TwoStateMarkovChain,
        }
    }

    /// Build a `ProcessSpec` from a kind and a keyword map (`{"p": 0.3, "q": 0.4}`).
    ///
    /// # Errors
    /// Returns the `serde_json` error when a parameter is missing, unknown, or
    /// of the wrong type.
    pub fn from_params(
        kind: ProcessKind, params: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        let mut tagged = params;
        tagged.insert("process".to_string(), serde_json::Value::from(kind.name()));
        serde_json::from_value(serde_json::Value::Object(tagged))
    }

    /// Validate the parameters and construct the simulator.
    ///
    /// # Errors
    /// Propagates the constructor's [`ProcessError`](crate::processes::errors::ProcessError).
    pub fn build(&self) -> ProcessResult<Process> {
        Ok(match *self {
            ProcessSpec::Ar1 { phi } => Process::Ar1(AR1::new(phi)?),
            ProcessSpec::CycleRandomWalk { b, s, f, vertices } => {
                Process::CycleRandomWalk(CycleRandomWalk::new(b, s, f, vertices)?)
            }
            ProcessSpec::Renewal { n } => Process::Renewal(Renewal::new(n)?),
            ProcessSpec::TwoStateMarkovChain { p, q } => {
                Process::TwoStateMarkovChain(TwoStateMarkovChain::new(p, q)?)
            }
        })
    }
}

/// A constructed simulator of any supported kind.
#[derive(Debug, Clone)]
pub enum Process {
    Ar1(AR1),
    CycleRandomWalk(CycleRandomWalk),
    Renewal(Renewal),
    TwoStateMarkovChain(TwoStateMarkovChain),
}

impl Process {
    /// The tag of the wrapped simulator.
    pub fn kind(&self) -> ProcessKind {
        match self {
            Process::Ar1(_) => ProcessKind::Ar1,
            Process::CycleRandomWalk(_) => ProcessKind::CycleRandomWalk,
            Process::Renewal(_) => ProcessKind::Renewal,
            Process::TwoStateMarkovChain(_) => ProcessKind::TwoStateMarkovChain,
        }
    }

    /// Draw an `f64` path of length `n` from the supplied random source.
    pub fn sample_path_f64<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        match self {
            Process::Ar1(p) => p.sample_path(n, rng),
            Process::CycleRandomWalk(p) => p.sample_path(n, rng).mapv(f64::from),
            Process::Renewal(p) => p.sample_path(n, rng).mapv(f64::from),
            Process::TwoStateMarkovChain(p) => p.sample_path(n, rng).mapv(f64::from),
        }
    }

    /// Draw an `f64` path of length `n` from a generator seeded with `seed`.
    pub fn generate_f64(&self, n: usize, seed: Option<u64>) -> Array1<f64> {
        match self {
            Process::Ar1(p) => p.generate_f64(n, seed),
            Process::CycleRandomWalk(p) => p.generate_f64(n, seed),
            Process::Renewal(p) => p.generate_f64(n, seed),
            Process::TwoStateMarkovChain(p) => p.generate_f64(n, seed),
        }
    }
}
