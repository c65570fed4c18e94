//! Property-based invariants for the stochastic-process simulators and the
//! walk-forward splitter.
//!
//! Coverage
//! --------
//! - Output length, value range and seed determinism of every simulator over
//!   random admissible parameters.
//! - Row-stochastic transition matrices for the Markov chain and the ring walk.
//! - Partition count and contiguity of `SequentialSplit`.
//! - Row count and lag alignment of assembled synthetic datasets.
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use synthetic_timeseries::{
    dataset::{SequentialSplit, synthesize},
    processes::{
        AR1, CycleRandomWalk, ProcessSpec, Renewal, StochasticProcess, TwoStateMarkovChain,
        validation::is_row_stochastic,
    },
};

const DEFAULT_CASES: u32 = 64;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES").ok().and_then(|raw| raw.parse::<u32>().ok()).unwrap_or(DEFAULT_CASES)
}

/// Normalized `(b, s, f)` weights.
fn move_probabilities() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0)
        .prop_filter("weights must not all vanish", |(b, s, f)| b + s + f > 1e-3)
        .prop_map(|(b, s, f)| {
            let total = b + s + f;
            let b = b / total;
            let f = f / total;
            (b, 1.0 - b - f, f)
        })
        .prop_filter("normalization must stay in range", |&(_, s, _)| (0.0..=1.0).contains(&s))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_cases()))]

    #[test]
    fn markov_chain_paths_are_binary_and_reproducible(
        p in 0.0f64..=1.0,
        q in 0.0f64..=1.0,
        n in 0usize..400,
        seed in any::<u64>(),
    ) {
        let chain = TwoStateMarkovChain::new(p, q).unwrap();
        prop_assert!(is_row_stochastic(chain.transition_matrix(), 1e-12));
        prop_assert!((chain.stationary_distribution().sum() - 1.0).abs() < 1e-12);

        let path = chain.generate(n, Some(seed));
        prop_assert_eq!(path.len(), n);
        prop_assert!(path.iter().all(|&x| x <= 1));
        prop_assert_eq!(path, chain.generate(n, Some(seed)));
    }

    #[test]
    fn ring_walk_stays_on_ring(
        (b, s, f) in move_probabilities(),
        vertices in 1usize..40,
        n in 1usize..400,
        seed in any::<u64>(),
    ) {
        let walk = CycleRandomWalk::new(b, s, f, vertices).unwrap();
        prop_assert!(is_row_stochastic(walk.transition_matrix(), 1e-9));

        let path = walk.generate(n, Some(seed));
        prop_assert_eq!(path.len(), n);
        prop_assert!(path.iter().all(|&x| (x as usize) < vertices));
    }

    #[test]
    fn ar1_follows_its_recursion_on_the_same_stream(
        phi in -1.5f64..1.5,
        n in 2usize..200,
        seed in any::<u64>(),
    ) {
        let path = AR1::new(phi).unwrap().generate(n, Some(seed));
        let noise = AR1::new(0.0).unwrap().generate(n, Some(seed));

        prop_assert_eq!(path[0], noise[0]);
        for t in 1..n {
            prop_assert!((path[t] - (phi * path[t - 1] + noise[t])).abs() < 1e-9 * (1.0 + path[t].abs()));
        }
    }

    #[test]
    fn renewal_emits_indicators(
        decay in 3.0f64..8.0,
        n in 0usize..300,
        seed in any::<u64>(),
    ) {
        let renewal = Renewal::new(decay).unwrap();
        let path = renewal.generate(n, Some(seed));
        prop_assert_eq!(path.len(), n);
        prop_assert!(path.iter().all(|&x| x <= 1));
    }

    #[test]
    fn sequential_split_partitions_are_contiguous(
        sizes in prop::collection::vec(1usize..6, 1..4),
        n_samples in 0usize..40,
    ) {
        let splitter = SequentialSplit::new(sizes.clone(), false);
        let total: usize = sizes.iter().sum();
        let parts: Vec<_> = splitter.split(n_samples).collect();

        prop_assert_eq!(parts.len(), (n_samples + 1).saturating_sub(total));
        for (t, part) in parts.iter().enumerate() {
            let flat: Vec<usize> = part.iter().flatten().copied().collect();
            prop_assert_eq!(flat, (t..t + total).collect::<Vec<_>>());
            for (segment, &size) in part.iter().zip(&sizes) {
                prop_assert_eq!(segment.len(), size);
            }
        }
    }

    #[test]
    fn synthetic_rows_match_request(
        n in 0usize..120,
        lags in 0usize..6,
        phi in -0.9f64..0.9,
        seed in any::<u64>(),
    ) {
        let data = synthesize(&ProcessSpec::Ar1 { phi }, n, lags, Some(seed)).unwrap();
        prop_assert_eq!(data.n_rows(), n);
        prop_assert_eq!(data.columns().len(), lags + 2);

        if lags > 0 && n > 1 {
            let value = data.column("value").unwrap();
            let lag1 = data.column("value_lag_1").unwrap();
            for r in 1..n {
                prop_assert_eq!(lag1[r], value[r - 1]);
            }
        }
    }
}
