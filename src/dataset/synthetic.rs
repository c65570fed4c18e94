//! dataset::synthetic — lagged supervised tables from simulated paths.
//!
//! Purpose
//! -------
//! Turn one simulated path into a regression table with the current value,
//! `lags` lagged copies and the one-step-ahead target, ready for a forecaster.
//!
//! Key behaviors
//! -------------
//! - [`get_synthetic`] resolves a process by name and keyword parameters;
//!   [`synthesize`] takes an already typed [`ProcessSpec`].
//! - `n + lags + 1` raw points are generated so that exactly `n` complete rows
//!   remain after shifting.
//! - Discrete processes receive independent `N(0, 1e-6²)` noise
//!   ([`perturb_discrete`]) so that quantile-based models do not see ties.
//!
//! Invariants & assumptions
//! ------------------------
//! - Row `r` of the table corresponds to raw index `t = r + lags`:
//!   `value = x[t]`, `value_lag_k = x[t − k]`, `target = x[t + 1]`.
//! - The noise generator is seeded from the same `seed` as the simulator,
//!   which keeps a seeded dataset fully reproducible.
//! - The output row count equals `n`; this is checked as a debug invariant.
//!
//! Conventions
//! -----------
//! - Columns are ordered `value, value_lag_1, …, value_lag_k, target`.
//! - Values are stored row-major in an `Array2<f64>` of shape
//!   `(n, lags + 2)`.
use std::io::Write;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, s};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{
    dataset::errors::{DatasetError, DatasetResult},
    processes::{ProcessKind, ProcessSpec, seeded_rng},
};

/// Standard deviation of the tie-breaking noise added to discrete paths.
pub const NOISE_SCALE: f64 = 1e-6;

/// Name of the current-value column.
pub const VALUE_COLUMN: &str = "value";

/// Name of the one-step-ahead column.
pub const TARGET_COLUMN: &str = "target";

/// `SyntheticDataset` — lagged feature table with a one-step-ahead target.
///
/// Fields
/// ------
/// - `columns`: `value`, `value_lag_1..value_lag_k`, `target`.
/// - `values`: `(rows, lags + 2)` matrix aligned with `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl SyntheticDataset {
    /// Column names in storage order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Full value matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of lag columns.
    pub fn lags(&self) -> usize {
        self.columns.len() - 2
    }

    /// Column view by name, `None` when absent.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.columns.iter().position(|c| c == name).map(|j| self.values.column(j))
    }

    /// Feature block (`value` and its lags), i.e. every column except `target`.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.values.slice(s![.., ..self.columns.len() - 1])
    }

    /// The `target` column.
    pub fn target(&self) -> ArrayView1<'_, f64> {
        self.values.column(self.columns.len() - 1)
    }

    /// Consume the dataset into `(columns, values)`.
    pub fn into_parts(self) -> (Vec<String>, Array2<f64>) {
        (self.columns, self.values)
    }

    /// Write the table as CSV with a header row and no index column.
    ///
    /// # Errors
    /// Returns [`DatasetError::Csv`] when the writer fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> DatasetResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in self.values.axis_iter(Axis(0)) {
            out.write_record(row.iter().map(|v| v.to_string()))?;
        }
        out.flush().map_err(|e| DatasetError::Csv { reason: e.to_string() })
    }
}

/// Column names for a table with `lags` lagged copies.
pub fn column_names(lags: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(lags + 2);
    names.push(VALUE_COLUMN.to_string());
    names.extend((1..=lags).map(|k| format!("{VALUE_COLUMN}_lag_{k}")));
    names.push(TARGET_COLUMN.to_string());
    names
}

/// Build a synthetic dataset for the process called `process`.
///
/// Parameters
/// ----------
/// - `process`: one of `ar1`, `cycle_random_walk`, `renewal`,
///   `two_state_markov_chain`.
/// - `n`: number of rows in the result.
/// - `lags`: number of lagged copies of `value`.
/// - `seed`: seed for both the simulator and the noise; OS entropy when `None`.
/// - `params`: the process's keyword parameters, e.g. `{"phi": 0.5}`.
///
/// # Errors
/// - [`DatasetError::UnknownProcess`] for an unregistered name.
/// - [`DatasetError::InvalidParams`] when `params` does not fit the process.
/// - [`DatasetError::Process`] when the constructor rejects the values.
pub fn get_synthetic(
    process: &str, n: usize, lags: usize, seed: Option<u64>,
    params: serde_json::Map<String, serde_json::Value>,
) -> DatasetResult<SyntheticDataset> {
    let kind: ProcessKind = process.parse()?;
    let spec = ProcessSpec::from_params(kind, params)
        .map_err(|e| DatasetError::InvalidParams { process: kind.name(), reason: e.to_string() })?;
    synthesize(&spec, n, lags, seed)
}

/// Build a synthetic dataset from a typed process specification.
///
/// # Errors
/// - [`DatasetError::Process`] when the constructor rejects the parameters.
/// - [`DatasetError::InvalidConfig`] when `n + lags + 1` overflows.
pub fn synthesize(
    spec: &ProcessSpec, n: usize, lags: usize, seed: Option<u64>,
) -> DatasetResult<SyntheticDataset> {
    let process = spec.build()?;
    let kind = process.kind();
    let len = n.checked_add(lags).and_then(|m| m.checked_add(1)).ok_or_else(|| {
        DatasetError::InvalidConfig { reason: format!("n = {n} with lags = {lags} overflows") }
    })?;

    tracing::debug!(process = %kind, n, lags, ?seed, "generating synthetic dataset");

    let mut sequence = process.generate_f64(len, seed);
    if kind.is_discrete() {
        perturb_discrete(&mut sequence, seed);
    }

    let dataset = lagged_table(sequence.view(), lags);
    debug_assert_eq!(dataset.n_rows(), n, "assembled row count must match the request");
    Ok(dataset)
}

/// Add independent `N(0, NOISE_SCALE²)` noise to every entry.
pub fn perturb_discrete(sequence: &mut Array1<f64>, seed: Option<u64>) {
    let mut rng = seeded_rng(seed);
    sequence.mapv_inplace(|x| {
        let z: f64 = rng.sample(StandardNormal);
        x + NOISE_SCALE * z
    });
}

/// Shift `sequence` into a table with `lags` lag columns and a one-step target.
///
/// Rows without a full set of lags or without a successor are dropped, so a
/// sequence of length `len` yields `len − lags − 1` rows (zero when shorter).
pub fn lagged_table(sequence: ArrayView1<'_, f64>, lags: usize) -> SyntheticDataset {
    let rows = sequence.len().saturating_sub(lags + 1);
    let target_col = lags + 1;
    let values = Array2::from_shape_fn((rows, lags + 2), |(r, c)| {
        let t = r + lags;
        if c == 0 {
            sequence[t]
        } else if c < target_col {
            sequence[t - c]
        } else {
            sequence[t + 1]
        }
    });
    SyntheticDataset { columns: column_names(lags), values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use serde_json::json;

    fn params(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Column naming and lag/target alignment on a hand-made sequence.
    // - Row count, finiteness and reproducibility of generated datasets.
    // - Name/parameter resolution errors.
    // - Noise on discrete processes only.
    // -------------------------------------------------------------------------

    #[test]
    fn column_names_follow_lag_order() {
        assert_eq!(column_names(2), vec!["value", "value_lag_1", "value_lag_2", "target"]);
        assert_eq!(column_names(0), vec!["value", "target"]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the lag/target alignment of `lagged_table`.
    //
    // Given
    // -----
    // - `x = [0, 1, 2, 3, 4, 5]`, `lags = 2`.
    //
    // Expect
    // ------
    // - Three rows: `[2, 1, 0, 3]`, `[3, 2, 1, 4]`, `[4, 3, 2, 5]`.
    fn lagged_table_aligns_lags_and_target() {
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

        let table = lagged_table(x.view(), 2);

        assert_eq!(
            table.values(),
            &array![[2.0, 1.0, 0.0, 3.0], [3.0, 2.0, 1.0, 4.0], [4.0, 3.0, 2.0, 5.0]]
        );
        assert_eq!(table.target(), array![3.0, 4.0, 5.0]);
        assert_eq!(table.features().ncols(), 3);
        assert_eq!(table.column("value_lag_2").unwrap(), array![0.0, 1.0, 2.0]);
        assert!(table.column("value_lag_3").is_none());
    }

    #[test]
    fn lagged_table_of_short_sequence_is_empty() {
        let x = array![1.0, 2.0];
        let table = lagged_table(x.view(), 3);
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.columns().len(), 5);
    }

    #[test]
    // Purpose
    // -------
    // Check the dataset shape for a named process.
    //
    // Given
    // -----
    // - `ar1` with `phi = 0.5`, `n = 500`, `lags = 3`, `seed = 1`.
    //
    // Expect
    // ------
    // - 500 rows, five columns, all values finite, `target[r] == value[r + 1]`.
    fn get_synthetic_returns_requested_rows() {
        let data = get_synthetic("ar1", 500, 3, Some(1), params(json!({"phi": 0.5}))).unwrap();

        assert_eq!(data.n_rows(), 500);
        assert_eq!(data.lags(), 3);
        assert_eq!(data.columns().len(), 5);
        assert!(data.values().iter().all(|v| v.is_finite()));

        let value = data.column("value").unwrap();
        let target = data.target();
        for r in 0..499 {
            assert_eq!(target[r], value[r + 1]);
        }
    }

    #[test]
    fn get_synthetic_is_reproducible_with_seed() {
        let spec = ProcessSpec::Renewal { n: 3.0 };
        assert_eq!(synthesize(&spec, 200, 2, Some(9)).unwrap(), synthesize(&spec, 200, 2, Some(9)).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Discrete paths get tiny noise; the continuous AR(1) path does not.
    //
    // Given
    // -----
    // - A Markov chain dataset and an AR(1) dataset, both seeded.
    //
    // Expect
    // ------
    // - Markov values are within 1e-4 of {0, 1} but not exactly integral.
    // - AR(1) values equal the raw generated path.
    fn noise_is_applied_to_discrete_processes_only() {
        let markov = synthesize(&ProcessSpec::TwoStateMarkovChain { p: 0.3, q: 0.4 }, 300, 1, Some(4))
            .unwrap();
        let value = markov.column("value").unwrap();
        for &v in value.iter() {
            assert_abs_diff_eq!(v, v.round(), epsilon = 1e-4);
            assert!(v.round() == 0.0 || v.round() == 1.0);
        }
        assert!(value.iter().any(|&v| v != v.round()));

        let ar = synthesize(&ProcessSpec::Ar1 { phi: 0.7 }, 100, 1, Some(4)).unwrap();
        let raw = ProcessSpec::Ar1 { phi: 0.7 }.build().unwrap().generate_f64(102, Some(4));
        assert_eq!(ar.column("value").unwrap(), raw.slice(s![1..101]));
    }

    #[test]
    fn unknown_process_and_bad_params_are_rejected() {
        assert_eq!(
            get_synthetic("garch", 10, 1, Some(0), params(json!({}))).unwrap_err(),
            DatasetError::UnknownProcess { name: "garch".to_string() }
        );
        assert!(matches!(
            get_synthetic("ar1", 10, 1, Some(0), params(json!({"p": 0.5}))),
            Err(DatasetError::InvalidParams { process: "ar1", .. })
        ));
        assert!(matches!(
            get_synthetic("two_state_markov_chain", 10, 1, Some(0), params(json!({"p": 1.5, "q": 0.1}))),
            Err(DatasetError::Process(_))
        ));
    }

    #[test]
    fn write_csv_emits_header_and_rows() {
        let table = lagged_table(array![1.0, 2.0, 3.0].view(), 1);
        let mut buf = Vec::new();

        table.write_csv(&mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "value,value_lag_1,target\n2,1,3\n");
    }
}
