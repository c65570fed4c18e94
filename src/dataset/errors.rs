//! Errors for dataset assembly, loading and configuration.
//!
//! This module defines [`DatasetError`], used by the synthetic assembler, the
//! CSV loader and the JSON configuration layer. Simulator construction errors
//! are wrapped unchanged in [`DatasetError::Process`].
//!
//! ## Conventions
//! - Row indices in error payloads are **0-based data rows** (the header is
//!   not counted).
//! - I/O, CSV and JSON failures are normalized to string reasons so the type
//!   stays `Clone + PartialEq`.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::processes::{ProcessError, UnknownProcessName};

/// Result alias for dataset operations that may produce [`DatasetError`].
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Unified error type for the dataset layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    // ---- Process selection ----
    /// Process name is not one of the registered processes.
    UnknownProcess { name: String },

    /// Keyword parameters do not match the selected process.
    InvalidParams { process: &'static str, reason: String },

    /// Simulator constructor rejected its parameters.
    Process(ProcessError),

    // ---- Target construction ----
    /// A target gap below one would leak the value being predicted.
    DataLeakage { gap: usize },

    /// A requested column is not present.
    MissingColumn { name: String },

    // ---- Loading ----
    /// File could not be opened or read.
    Io { path: String, reason: String },

    /// CSV reader failure (malformed record, unequal lengths, ...).
    Csv { reason: String },

    /// A field could not be parsed.
    Parse { row: usize, column: String, value: String },

    // ---- Configuration ----
    /// Configuration could not be decoded or is inconsistent.
    InvalidConfig { reason: String },
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Process(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::UnknownProcess { name } => {
                write!(f, "Stochastic process {name} is not available.")
            }
            DatasetError::InvalidParams { process, reason } => {
                write!(f, "Invalid parameters for {process}: {reason}")
            }
            DatasetError::Process(err) => write!(f, "{err}"),
            DatasetError::DataLeakage { gap } => {
                write!(
                    f,
                    "A gap less than 1 would constitute data leakage and is not allowed; got: {gap}"
                )
            }
            DatasetError::MissingColumn { name } => {
                write!(f, "Column {name:?} not found.")
            }
            DatasetError::Io { path, reason } => {
                write!(f, "Could not read {path}: {reason}")
            }
            DatasetError::Csv { reason } => write!(f, "CSV error: {reason}"),
            DatasetError::Parse { row, column, value } => {
                write!(f, "Could not parse {value:?} in column {column:?} at row {row}.")
            }
            DatasetError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
        }
    }
}

impl From<ProcessError> for DatasetError {
    fn from(err: ProcessError) -> DatasetError {
        DatasetError::Process(err)
    }
}

impl From<UnknownProcessName> for DatasetError {
    fn from(err: UnknownProcessName) -> DatasetError {
        DatasetError::UnknownProcess { name: err.0 }
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> DatasetError {
        DatasetError::Csv { reason: err.to_string() }
    }
}

/// Convert a [`DatasetError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<DatasetError> for PyErr {
    fn from(err: DatasetError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn unknown_process_message_names_the_process() {
        let err = DatasetError::from(UnknownProcessName("garch".to_string()));
        assert_eq!(err.to_string(), "Stochastic process garch is not available.");
    }

    #[test]
    fn leakage_message_mentions_leakage() {
        let msg = DatasetError::DataLeakage { gap: 0 }.to_string();
        assert!(msg.contains("data leakage"), "unexpected message: {msg}");
    }

    #[test]
    fn process_errors_are_wrapped_with_source() {
        let inner = ProcessError::InvalidDecayCoefficient { value: 0.5 };
        let err = DatasetError::from(inner.clone());

        assert_eq!(err.to_string(), inner.to_string());
        assert!(err.source().is_some());
    }
}
