//! Two-state Markov chain on `{0, 1}`.
//!
//! Purpose
//! -------
//! Generate binary sequences with geometric sojourn times whose dependence is
//! controlled by two switching probabilities.
//!
//! Key behaviors
//! -------------
//! - [`TwoStateMarkovChain::new`] validates `p` and `q`, builds the 2×2
//!   transition matrix `P = [[1 − p, p], [q, 1 − q]]` and the stationary
//!   distribution `π = (q / (p + q), p / (p + q))`.
//! - Sampling starts from `π` and then draws each state as a Bernoulli trial
//!   with success probability `P[state, 1]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 ≤ p, q ≤ 1`.
//! - `P` is row-stochastic and `π` is a probability vector of length 2.
//! - When `p = q = 0` the chain never moves and every distribution is
//!   stationary; `π` is then taken as `(1/2, 1/2)`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction errors, matrix/stationary values, range and
//!   determinism of generated paths, and absorbing edge cases.
use ndarray::{Array1, Array2, array};
use rand::{
    Rng,
    distributions::{Bernoulli, Distribution},
};

use crate::processes::{
    errors::ProcessResult,
    traits::StochasticProcess,
    validation::{is_row_stochastic, verify_probability},
};

/// `TwoStateMarkovChain` — binary Markov chain with switching probabilities
/// `p` (0 → 1) and `q` (1 → 0).
///
/// Fields
/// ------
/// - `p`, `q`: validated switching probabilities.
/// - `transition`: `Array2<f64>` of shape `(2, 2)`.
/// - `stationary`: `Array1<f64>` of length 2.
/// - `initial`, `to_one`: Bernoulli laws for the initial state and for the
///   move into state 1 from each current state, built once at construction.
#[derive(Debug, Clone)]
pub struct TwoStateMarkovChain {
    p: f64,
    q: f64,
    transition: Array2<f64>,
    stationary: Array1<f64>,
    initial: Bernoulli,
    to_one: [Bernoulli; 2],
}

impl TwoStateMarkovChain {
    /// Construct a validated two-state chain.
    ///
    /// # Errors
    /// - [`ProcessError::InvalidProbability`] if `p` or `q` is outside `[0, 1]`.
    ///
    /// [`ProcessError::InvalidProbability`]: crate::processes::errors::ProcessError::InvalidProbability
    pub fn new(p: f64, q: f64) -> ProcessResult<Self> {
        let p = verify_probability("p", p)?;
        let q = verify_probability("q", q)?;

        let transition = array![[1.0 - p, p], [q, 1.0 - q]];
        let stationary = if p + q > 0.0 {
            array![q / (p + q), p / (p + q)]
        } else {
            array![0.5, 0.5]
        };
        debug_assert_eq!(stationary.len(), 2);
        debug_assert!(is_row_stochastic(&transition, 1e-12));

        let initial = Bernoulli::new(stationary[1])?;
        let to_one = [Bernoulli::new(transition[[0, 1]])?, Bernoulli::new(transition[[1, 1]])?];

        Ok(TwoStateMarkovChain { p, q, transition, stationary, initial, to_one })
    }

    /// Probability of moving from state 0 to state 1.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Probability of moving from state 1 to state 0.
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Transition matrix `P`.
    pub fn transition_matrix(&self) -> &Array2<f64> {
        &self.transition
    }

    /// Stationary distribution `π`.
    pub fn stationary_distribution(&self) -> &Array1<f64> {
        &self.stationary
    }
}

impl StochasticProcess for TwoStateMarkovChain {
    type State = u8;

    fn sample_path<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<u8> {
        let mut states = Array1::<u8>::zeros(n);
        if n == 0 {
            return states;
        }

        states[0] = u8::from(self.initial.sample(rng));
        for i in 1..n {
            let prev = usize::from(states[i - 1]);
            states[i] = u8::from(self.to_one[prev].sample(rng));
        }

        debug_assert!(states.iter().all(|&s| s <= 1));
        states
    }
}
