//! dataset::loader — processed CSV tables with a datetime index.
//!
//! Purpose
//! -------
//! Load the preprocessed feature tables written by the data pipeline and
//! attach a forward-shifted target column for supervised forecasting.
//!
//! Key behaviors
//! -------------
//! - [`get_data`] / [`get_data_in`] read
//!   `data/processed/df-{target}-{year}-maxlags_{maxlags}.csv`, parse the
//!   `datetime` index column and every other column as `f64`.
//! - With a non-empty `target`, a `target` column is added holding the named
//!   column shifted `target_gap` rows into the future.
//! - Rows containing any NaN (empty cells, `NaN` literals, or the tail left
//!   by the shift) are dropped.
//!
//! Invariants & assumptions
//! ------------------------
//! - A target with `target_gap < 1` is rejected as data leakage before any
//!   file is touched.
//! - A gap without a target is ignored with a `tracing` warning.
//!
//! Conventions
//! -----------
//! - Datetimes are naive (no offset). Accepted layouts are `%Y-%m-%d %H:%M:%S`
//!   and `%Y-%m-%dT%H:%M:%S`, each with optional fractional seconds, and a
//!   bare `%Y-%m-%d` date (midnight).
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::dataset::{
    errors::{DatasetError, DatasetResult},
    synthetic::TARGET_COLUMN,
};

/// Name of the index column in processed tables.
pub const INDEX_COLUMN: &str = "datetime";

const DATETIME_FORMATS: [&str; 4] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// `TimeFrame` — datetime-indexed table of `f64` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFrame {
    index: Vec<NaiveDateTime>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl TimeFrame {
    /// Assemble a frame, checking that the parts agree in shape.
    ///
    /// # Errors
    /// Returns [`DatasetError::InvalidConfig`] when `index`, `columns` and
    /// `values` disagree in length.
    pub fn new(
        index: Vec<NaiveDateTime>, columns: Vec<String>, values: Array2<f64>,
    ) -> DatasetResult<Self> {
        if values.dim() != (index.len(), columns.len()) {
            return Err(DatasetError::InvalidConfig {
                reason: format!(
                    "values of shape {:?} do not match {} rows and {} columns",
                    values.dim(),
                    index.len(),
                    columns.len()
                ),
            });
        }
        Ok(TimeFrame { index, columns, values })
    }

    /// Read a CSV file with a `datetime` column and numeric data columns.
    ///
    /// # Errors
    /// - [`DatasetError::Io`] when the file cannot be opened.
    /// - [`DatasetError::Csv`] for malformed records.
    /// - [`DatasetError::MissingColumn`] when there is no `datetime` column.
    /// - [`DatasetError::Parse`] for unparseable datetimes or numbers.
    pub fn read_csv(path: &Path) -> DatasetResult<Self> {
        let reader = csv::Reader::from_path(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_reader(reader)
    }

    /// Parse CSV from any reader; see [`TimeFrame::read_csv`].
    pub fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> DatasetResult<Self> {
        let headers = reader.headers()?.clone();
        let index_pos = headers
            .iter()
            .position(|h| h == INDEX_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn { name: INDEX_COLUMN.to_string() })?;
        let columns: Vec<String> =
            headers.iter().enumerate().filter(|&(j, _)| j != index_pos).map(|(_, h)| h.to_string()).collect();

        let mut index = Vec::new();
        let mut flat = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            for (j, field) in record.iter().enumerate() {
                if j == index_pos {
                    index.push(parse_datetime(field).ok_or_else(|| DatasetError::Parse {
                        row,
                        column: INDEX_COLUMN.to_string(),
                        value: field.to_string(),
                    })?);
                } else {
                    flat.push(parse_value(field).ok_or_else(|| DatasetError::Parse {
                        row,
                        column: headers.get(j).unwrap_or_default().to_string(),
                        value: field.to_string(),
                    })?);
                }
            }
        }

        let values = Array2::from_shape_vec((index.len(), columns.len()), flat)
            .map_err(|e| DatasetError::Csv { reason: e.to_string() })?;
        TimeFrame::new(index, columns, values)
    }

    /// Datetime index.
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Column names (the index column excluded).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value matrix aligned with [`columns`](Self::columns).
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Column view by name, `None` when absent.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.position(name).map(|j| self.values.column(j))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Add (or overwrite) the `target` column with `source` shifted `gap`
    /// rows into the future. The last `gap` rows become NaN.
    ///
    /// # Errors
    /// Returns [`DatasetError::MissingColumn`] when `source` is absent.
    pub fn with_shifted_target(mut self, source: &str, gap: usize) -> DatasetResult<Self> {
        let src = self
            .position(source)
            .ok_or_else(|| DatasetError::MissingColumn { name: source.to_string() })?;
        let rows = self.n_rows();
        let column = self.values.column(src);
        let shifted =
            Array1::from_shape_fn(rows, |t| t.checked_add(gap).filter(|&u| u < rows).map_or(f64::NAN, |u| column[u]));

        match self.position(TARGET_COLUMN) {
            Some(dst) => self.values.column_mut(dst).assign(&shifted),
            None => {
                self.values
                    .push_column(shifted.view())
                    .map_err(|e| DatasetError::Csv { reason: e.to_string() })?;
                self.columns.push(TARGET_COLUMN.to_string());
            }
        }
        Ok(self)
    }

    /// Drop every row that contains a NaN.
    pub fn drop_incomplete(self) -> Self {
        let keep: Vec<usize> = self
            .values
            .axis_iter(Axis(0))
            .enumerate()
            .filter(|(_, row)| !row.iter().any(|v| v.is_nan()))
            .map(|(i, _)| i)
            .collect();
        let values = self.values.select(Axis(0), &keep);
        let index = keep.iter().map(|&i| self.index[i]).collect();
        TimeFrame { index, columns: self.columns, values }
    }
}

/// Location of a processed table under `root`.
pub fn processed_path(root: &Path, target: &str, year: i32, maxlags: usize) -> PathBuf {
    root.join("data").join("processed").join(format!("df-{target}-{year}-maxlags_{maxlags}.csv"))
}

/// Validate the `(target, target_gap)` pair and return the gap to apply.
///
/// Returns `Some(gap)` when a target is requested and `None` when no target
/// is requested (a non-zero gap is then ignored with a warning).
///
/// # Errors
/// Returns [`DatasetError::DataLeakage`] for a target with `target_gap < 1`.
pub fn check_target_gap(target: &str, target_gap: usize) -> DatasetResult<Option<usize>> {
    if target.is_empty() {
        if target_gap != 0 {
            tracing::warn!(target_gap, "target_gap is ignored because no target was given");
        }
        return Ok(None);
    }
    if target_gap < 1 {
        return Err(DatasetError::DataLeakage { gap: target_gap });
    }
    Ok(Some(target_gap))
}

/// Load a processed table relative to the current directory.
///
/// See [`get_data_in`].
pub fn get_data(target: &str, target_gap: usize, maxlags: usize, year: i32) -> DatasetResult<TimeFrame> {
    get_data_in(Path::new("."), target, target_gap, maxlags, year)
}

/// Load `data/processed/df-{target}-{year}-maxlags_{maxlags}.csv` under `root`.
///
/// # Errors
/// - [`DatasetError::DataLeakage`] for a target with `target_gap < 1`.
/// - Any error of [`TimeFrame::read_csv`] and
///   [`TimeFrame::with_shifted_target`].
pub fn get_data_in(
    root: &Path, target: &str, target_gap: usize, maxlags: usize, year: i32,
) -> DatasetResult<TimeFrame> {
    let gap = check_target_gap(target, target_gap)?;
    let path = processed_path(root, target, year, maxlags);
    tracing::debug!(path = %path.display(), "loading processed table");

    let mut frame = TimeFrame::read_csv(&path)?;
    if let Some(gap) = gap {
        frame = frame.with_shifted_target(target, gap)?;
    }
    Ok(frame.drop_incomplete())
}

fn parse_datetime(field: &str) -> Option<NaiveDateTime> {
    let field = field.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(field, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(field, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
}

/// Empty cells and NaN literals read as NaN.
fn parse_value(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    field.parse().ok()
}
