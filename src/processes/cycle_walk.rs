//! Lazy random walk on the cycle graph `C_v`.
//!
//! Purpose
//! -------
//! Generate periodic, slowly-mixing integer sequences: a walker on `v`
//! vertices arranged in a ring steps backward with probability `b`, stays with
//! probability `s` and steps forward with probability `f`.
//!
//! Key behaviors
//! -------------
//! - [`CycleRandomWalk::new`] validates `(b, s, f)` and `vertices`, then builds
//!   the `v × v` circulant transition matrix (`b` on the sub-diagonal, `s` on
//!   the diagonal, `f` on the super-diagonal, wrap-around corners `P[0, v−1] = b`
//!   and `P[v−1, 0] = f`).
//! - The stationary distribution is uniform; sampling starts from it and adds
//!   i.i.d. moves in `{−1, 0, +1}` modulo `v`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 ≤ b, s, f ≤ 1` and `|b + s + f − 1| < 1e-12`.
//! - `1 ≤ vertices ≤ MAX_VERTICES`. The transition matrix is stored densely
//!   (`vertices²` entries), which bounds the ring size.
//! - Edges are accumulated modulo `v`, so on `C_1` and `C_2` coinciding edges
//!   add up and every row still sums to one.
use ndarray::{Array1, Array2};
use rand::{
    Rng,
    distributions::{Distribution, WeightedIndex},
};

use crate::processes::{
    errors::{ProcessError, ProcessResult},
    traits::StochasticProcess,
    validation::{is_row_stochastic, verify_probability, verify_probability_sum},
};

/// Largest supported ring; the dense transition matrix then takes 32 MiB.
pub const MAX_VERTICES: usize = 2048;

/// Step offsets, aligned with the `(b, s, f)` weights.
const MOVES: [i8; 3] = [-1, 0, 1];

/// `CycleRandomWalk` — random walk on a ring of `vertices` states.
///
/// Fields
/// ------
/// - `b`, `s`, `f`: validated move probabilities.
/// - `vertices`: ring size.
/// - `transition`: circulant transition matrix of shape `(vertices, vertices)`.
/// - `stationary`: uniform distribution over vertices.
/// - `moves`: categorical law over [`MOVES`] built once at construction.
#[derive(Debug, Clone)]
pub struct CycleRandomWalk {
    b: f64,
    s: f64,
    f: f64,
    vertices: u32,
    transition: Array2<f64>,
    stationary: Array1<f64>,
    moves: WeightedIndex<f64>,
}

impl CycleRandomWalk {
    /// Construct a validated cycle random walk.
    ///
    /// # Errors
    /// - [`ProcessError::InvalidProbability`] if any of `b, s, f` is outside `[0, 1]`.
    /// - [`ProcessError::ProbabilitiesDoNotSumToOne`] if `|b + s + f − 1| ≥ 1e-12`.
    /// - [`ProcessError::InvalidVertexCount`] if `vertices` is zero.
    /// - [`ProcessError::TooManyVertices`] if `vertices > MAX_VERTICES`.
    pub fn new(b: f64, s: f64, f: f64, vertices: usize) -> ProcessResult<Self> {
        let b = verify_probability("b", b)?;
        let s = verify_probability("s", s)?;
        let f = verify_probability("f", f)?;
        verify_probability_sum(&[b, s, f])?;
        if vertices == 0 {
            return Err(ProcessError::InvalidVertexCount { vertices });
        }
        let ring = match u32::try_from(vertices) {
            Ok(v) if vertices <= MAX_VERTICES => v,
            _ => return Err(ProcessError::TooManyVertices { vertices, max: MAX_VERTICES }),
        };

        let mut transition = Array2::<f64>::zeros((vertices, vertices));
        for j in 0..vertices {
            transition[[j, (j + vertices - 1) % vertices]] += b;
            transition[[j, j]] += s;
            transition[[j, (j + 1) % vertices]] += f;
        }
        debug_assert!(
            is_row_stochastic(&transition, 1e-9),
            "transition matrix rows must sum up to one"
        );

        let stationary = Array1::from_elem(vertices, 1.0 / vertices as f64);
        let moves = WeightedIndex::new([b, s, f])?;

        Ok(CycleRandomWalk { b, s, f, vertices: ring, transition, stationary, moves })
    }

    /// Backward-step probability.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Stay probability.
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Forward-step probability.
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Number of vertices on the ring.
    pub fn vertices(&self) -> usize {
        self.vertices as usize
    }

    /// Transition matrix `P`.
    pub fn transition_matrix(&self) -> &Array2<f64> {
        &self.transition
    }

    /// Stationary (uniform) distribution.
    pub fn stationary_distribution(&self) -> &Array1<f64> {
        &self.stationary
    }
}

impl StochasticProcess for CycleRandomWalk {
    type State = u32;

    fn sample_path<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<u32> {
        let mut states = Array1::<u32>::zeros(n);
        if n == 0 {
            return states;
        }

        let v = self.vertices;
        let mut state = rng.gen_range(0..v);
        states[0] = state;
        for slot in states.iter_mut().skip(1) {
            state = match MOVES[self.moves.sample(rng)] {
                -1 if state == 0 => v - 1,
                -1 => state - 1,
                1 => (state + 1) % v,
                _ => state,
            };
            *slot = state;
        }

        debug_assert!(states.iter().all(|&x| x < v));
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation of probabilities, their sum, and the vertex count.
    // - Circulant structure and stochasticity of the transition matrix,
    //   including the small rings C_1 and C_2.
    // - Range, step structure and determinism of generated paths.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure probabilities that do not sum to one are rejected.
    //
    // Given
    // -----
    // - `b = s = f = 0.5`, `vertices = 4`.
    //
    // Expect
    // ------
    // - `ProbabilitiesDoNotSumToOne { sum: 1.5 }`.
    fn new_rejects_unnormalized_probabilities() {
        assert_eq!(
            CycleRandomWalk::new(0.5, 0.5, 0.5, 4).unwrap_err(),
            ProcessError::ProbabilitiesDoNotSumToOne { sum: 1.5 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure out-of-range probabilities and an empty ring are rejected.
    fn new_rejects_bad_probability_and_empty_ring() {
        assert!(matches!(
            CycleRandomWalk::new(-0.1, 0.6, 0.5, 4),
            Err(ProcessError::InvalidProbability { name: "b", .. })
        ));
        assert_eq!(
            CycleRandomWalk::new(0.2, 0.5, 0.3, 0).unwrap_err(),
            ProcessError::InvalidVertexCount { vertices: 0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Oversized rings are rejected before the dense matrix is allocated.
    //
    // Given
    // -----
    // - `vertices = MAX_VERTICES + 1` and `vertices = 1_000_000`.
    //
    // Expect
    // ------
    // - `TooManyVertices` for both; `MAX_VERTICES` itself is accepted.
    fn new_rejects_oversized_ring() {
        for vertices in [MAX_VERTICES + 1, 1_000_000] {
            assert_eq!(
                CycleRandomWalk::new(0.2, 0.5, 0.3, vertices).unwrap_err(),
                ProcessError::TooManyVertices { vertices, max: MAX_VERTICES }
            );
        }
        assert_eq!(CycleRandomWalk::new(0.2, 0.5, 0.3, MAX_VERTICES).unwrap().vertices(), MAX_VERTICES);
    }

    #[test]
    // Purpose
    // -------
    // Verify the circulant layout including the wrap-around corners.
    //
    // Given
    // -----
    // - `b = 0.2`, `s = 0.5`, `f = 0.3`, `vertices = 5`.
    //
    // Expect
    // ------
    // - `P[j, j−1] = b`, `P[j, j] = s`, `P[j, j+1] = f` (indices mod 5),
    //   `P[0, 4] = b`, `P[4, 0] = f`, zeros elsewhere, rows sum to one,
    //   uniform stationary distribution.
    fn new_builds_circulant_matrix() {
        let walk = CycleRandomWalk::new(0.2, 0.5, 0.3, 5).unwrap();
        let p = walk.transition_matrix();

        assert_eq!(p.dim(), (5, 5));
        assert_eq!(p[[0, 4]], 0.2);
        assert_eq!(p[[4, 0]], 0.3);
        for j in 0..5 {
            assert_eq!(p[[j, j]], 0.5);
            assert_eq!(p[[j, (j + 4) % 5]], 0.2);
            assert_eq!(p[[j, (j + 1) % 5]], 0.3);
            assert_relative_eq!(p.row(j).sum(), 1.0, epsilon = 1e-12);
            assert_eq!(p.row(j).iter().filter(|&&x| x == 0.0).count(), 2);
        }
        assert!(walk.stationary_distribution().iter().all(|&x| x == 0.2));
    }

    #[test]
    // Purpose
    // -------
    // Ensure small rings still yield stochastic matrices.
    //
    // Given
    // -----
    // - `vertices = 1` and `vertices = 2` with `b = 0.1`, `s = 0.6`, `f = 0.3`.
    //
    // Expect
    // ------
    // - `C_1`: `P = [[1]]`. `C_2`: off-diagonal entries equal `b + f`.
    fn small_rings_accumulate_coincident_edges() {
        let one = CycleRandomWalk::new(0.1, 0.6, 0.3, 1).unwrap();
        assert_relative_eq!(one.transition_matrix()[[0, 0]], 1.0, epsilon = 1e-12);

        let two = CycleRandomWalk::new(0.1, 0.6, 0.3, 2).unwrap();
        assert_relative_eq!(two.transition_matrix()[[0, 1]], 0.4, epsilon = 1e-12);
        assert_relative_eq!(two.transition_matrix()[[1, 0]], 0.4, epsilon = 1e-12);
        assert!(is_row_stochastic(two.transition_matrix(), 1e-12));
    }

    #[test]
    // Purpose
    // -------
    // Check range, step structure and determinism.
    //
    // Given
    // -----
    // - `b = 0.25`, `s = 0.5`, `f = 0.25`, `vertices = 7`, `n = 2000`.
    //
    // Expect
    // ------
    // - Every value lies in `[0, 7)`.
    // - Consecutive values differ by −1, 0 or +1 modulo 7.
    // - Equal seeds give equal paths; different seeds differ.
    fn generate_stays_on_ring_and_moves_by_one() {
        let walk = CycleRandomWalk::new(0.25, 0.5, 0.25, 7).unwrap();

        let path = walk.generate(2000, Some(42));

        assert_eq!(path.len(), 2000);
        assert!(path.iter().all(|&x| x < 7));
        for w in path.windows(2) {
            let diff = (w[1] + 7 - w[0]) % 7;
            assert!(diff == 0 || diff == 1 || diff == 6, "illegal step {} -> {}", w[0], w[1]);
        }
        assert_eq!(path, walk.generate(2000, Some(42)));
        assert_ne!(path, walk.generate(2000, Some(43)));
    }

    #[test]
    // Purpose
    // -------
    // A deterministic forward walk advances by exactly one each step.
    fn forward_only_walk_is_deterministic_after_start() {
        let walk = CycleRandomWalk::new(0.0, 0.0, 1.0, 4).unwrap();

        let path = walk.generate(10, Some(9));

        for t in 1..10 {
            assert_eq!(path[t], (path[0] + t as u32) % 4);
        }
    }
}
