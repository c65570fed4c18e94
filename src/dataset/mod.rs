//! dataset — supervised tables built from simulated or processed series.
//!
//! Purpose
//! -------
//! Bridge raw sequences and forecasting models: assemble lagged feature
//! tables from simulated paths, load preprocessed CSV tables, and enumerate
//! walk-forward train/test partitions.
//!
//! Key behaviors
//! -------------
//! - [`get_synthetic`] / [`synthesize`]: process → `N` rows of
//!   `value, value_lag_1..k, target`.
//! - [`SequentialSplit`]: sliding contiguous index segments.
//! - [`get_data`] / [`get_data_in`]: datetime-indexed CSV tables with an
//!   optional forward-shifted target and a data-leakage guard.
//! - [`SyntheticConfig`]: JSON description of a synthetic run.
//!
//! Invariants & assumptions
//! ------------------------
//! - All fallible operations return [`DatasetResult`]; simulator validation
//!   errors are wrapped in [`DatasetError::Process`].
//! - Logging goes through `tracing`; the library never installs a subscriber.
pub mod config;
pub mod errors;
pub mod loader;
pub mod split;
pub mod synthetic;

pub use self::config::SyntheticConfig;
pub use self::errors::{DatasetError, DatasetResult};
pub use self::loader::{TimeFrame, get_data, get_data_in};
pub use self::split::{SequentialSplit, Splits};
pub use self::synthetic::{SyntheticDataset, get_synthetic, synthesize};
