//! JSON configuration for synthetic dataset runs.
//!
//! A configuration names the process with its parameters, the number of rows,
//! the number of lags and an optional seed:
//!
//! ```json
//! {
//!   "process": {"process": "two_state_markov_chain", "p": 0.3, "q": 0.4},
//!   "n": 500,
//!   "lags": 3,
//!   "seed": 1
//! }
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    dataset::{
        errors::{DatasetError, DatasetResult},
        synthetic::{SyntheticDataset, synthesize},
    },
    processes::ProcessSpec,
};

/// `SyntheticConfig` — everything needed to reproduce one synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyntheticConfig {
    pub process: ProcessSpec,
    pub n: usize,
    #[serde(default)]
    pub lags: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SyntheticConfig {
    /// Decode a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`DatasetError::InvalidConfig`] with the decoder message.
    pub fn from_json_str(text: &str) -> DatasetResult<Self> {
        serde_json::from_str(text).map_err(|e| DatasetError::InvalidConfig { reason: e.to_string() })
    }

    /// Read and decode a JSON configuration file.
    ///
    /// # Errors
    /// - [`DatasetError::Io`] when the file cannot be read.
    /// - [`DatasetError::InvalidConfig`] when it does not decode.
    pub fn from_path(path: &Path) -> DatasetResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`DatasetError::InvalidConfig`] if serialization fails.
    pub fn to_json_string(&self) -> DatasetResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DatasetError::InvalidConfig { reason: e.to_string() })
    }

    /// Build the dataset described by this configuration.
    ///
    /// # Errors
    /// Propagates the errors of [`synthesize`].
    pub fn generate(&self) -> DatasetResult<SyntheticDataset> {
        synthesize(&self.process, self.n, self.lags, self.seed)
    }
}
