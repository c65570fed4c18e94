//! synthetic_timeseries — seeded stochastic-process simulators and lagged
//! datasets for forecasting experiments, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the simulators and dataset builders to Python via the
//! `_synthetic_timeseries` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`processes` and `dataset`) as the public
//!   crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_synthetic_timeseries` Python extension.
//! - Create and register the Python submodules `stochastic_processes` and
//!   `data` under `synthetic_timeseries` so that dot-notation imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument conversion, and error mapping.
//! - Python-visible classes hold a fully validated Rust simulator; a failed
//!   constructor raises `ValueError` and never yields an instance.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_synthetic_timeseries.<submodule>` and
//!   keep the Rust type names (`TwoStateMarkovChain`, `AR1`, ...).
//! - Generated paths are returned as `numpy.ndarray` (`uint8` for binary
//!   processes, `uint32` for ring vertices, `float64` for AR(1)).
//! - Tables are returned as a `dict` of columns, directly consumable by
//!   `pandas.DataFrame`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`; the PyO3 layer is exercised from Python.

pub mod dataset;
pub mod processes;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    dataset::{SequentialSplit, loader, synthetic},
    processes::{
        AR1, ClosedFormRenewal, CycleRandomWalk, Renewal, StochasticProcess, TwoStateMarkovChain,
    },
    utils::{columns_to_py, datetimes_to_py, extract_params, matrix_to_py},
};

/// TwoStateMarkovChain — Python-facing wrapper for the binary Markov chain.
///
/// Constructed from Python via `TwoStateMarkovChain(p, q)`; raises
/// `ValueError` when `p` or `q` is outside `[0, 1]`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "TwoStateMarkovChain", module = "synthetic_timeseries.stochastic_processes")]
pub struct PyTwoStateMarkovChain {
    inner: TwoStateMarkovChain,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyTwoStateMarkovChain {
    #[new]
    #[pyo3(text_signature = "(p, q, /)")]
    pub fn new(p: f64, q: f64) -> PyResult<Self> {
        Ok(PyTwoStateMarkovChain { inner: TwoStateMarkovChain::new(p, q)? })
    }

    #[getter]
    pub fn p(&self) -> f64 {
        self.inner.p()
    }

    #[getter]
    pub fn q(&self) -> f64 {
        self.inner.q()
    }

    #[getter]
    pub fn transition_matrix<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        matrix_to_py(py, self.inner.transition_matrix())
    }

    #[getter]
    pub fn stationary_distribution<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.stationary_distribution().clone().into_pyarray(py)
    }

    /// Generate `n` states in {0, 1}.
    #[pyo3(signature = (n, seed = None), text_signature = "(n, /, seed=None)")]
    pub fn generate<'py>(&self, py: Python<'py>, n: usize, seed: Option<u64>) -> Bound<'py, PyArray1<u8>> {
        self.inner.generate(n, seed).into_pyarray(py)
    }
}

/// AR1 — Python-facing wrapper for the Gaussian AR(1) process.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "AR1", module = "synthetic_timeseries.stochastic_processes")]
pub struct PyAR1 {
    inner: AR1,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyAR1 {
    #[new]
    #[pyo3(text_signature = "(phi, /)")]
    pub fn new(phi: f64) -> PyResult<Self> {
        Ok(PyAR1 { inner: AR1::new(phi)? })
    }

    #[getter]
    pub fn phi(&self) -> f64 {
        self.inner.phi()
    }

    /// Generate `n` real values.
    #[pyo3(signature = (n, seed = None), text_signature = "(n, /, seed=None)")]
    pub fn generate<'py>(&self, py: Python<'py>, n: usize, seed: Option<u64>) -> Bound<'py, PyArray1<f64>> {
        self.inner.generate(n, seed).into_pyarray(py)
    }
}

/// CycleRandomWalk — Python-facing wrapper for the lazy walk on a ring.
///
/// Constructed from Python via `CycleRandomWalk(b, s, f, vertices)`; raises
/// `ValueError` for invalid probabilities, probabilities not summing to one,
/// an empty ring, or a ring larger than `MAX_VERTICES` (2048).
#[cfg(feature = "python-bindings")]
#[pyclass(name = "CycleRandomWalk", module = "synthetic_timeseries.stochastic_processes")]
pub struct PyCycleRandomWalk {
    inner: CycleRandomWalk,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyCycleRandomWalk {
    #[new]
    #[pyo3(text_signature = "(b, s, f, vertices, /)")]
    pub fn new(b: f64, s: f64, f: f64, vertices: usize) -> PyResult<Self> {
        Ok(PyCycleRandomWalk { inner: CycleRandomWalk::new(b, s, f, vertices)? })
    }

    #[getter]
    pub fn vertices(&self) -> usize {
        self.inner.vertices()
    }

    #[getter]
    pub fn transition_matrix<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        matrix_to_py(py, self.inner.transition_matrix())
    }

    #[getter]
    pub fn stationary_distribution<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.stationary_distribution().clone().into_pyarray(py)
    }

    /// Generate `n` vertex indices in `[0, vertices)`.
    #[pyo3(signature = (n, seed = None), text_signature = "(n, /, seed=None)")]
    pub fn generate<'py>(&self, py: Python<'py>, n: usize, seed: Option<u64>) -> Bound<'py, PyArray1<u32>> {
        self.inner.generate(n, seed).into_pyarray(py)
    }
}

/// Renewal — Python-facing wrapper for the polynomial-tail renewal process.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "Renewal", module = "synthetic_timeseries.stochastic_processes")]
pub struct PyRenewal {
    inner: Renewal,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyRenewal {
    #[new]
    #[pyo3(text_signature = "(n, /)")]
    pub fn new(n: f64) -> PyResult<Self> {
        Ok(PyRenewal { inner: Renewal::new(n)? })
    }

    #[getter]
    pub fn n(&self) -> f64 {
        self.inner.n()
    }

    #[getter]
    pub fn lim_f(&self) -> usize {
        self.inner.lim_f()
    }

    #[getter]
    pub fn lim_x_zero(&self) -> usize {
        self.inner.lim_x_zero()
    }

    /// Generate `n` arrival indicators in {0, 1}.
    #[pyo3(signature = (n, seed = None), text_signature = "(n, /, seed=None)")]
    pub fn generate<'py>(&self, py: Python<'py>, n: usize, seed: Option<u64>) -> Bound<'py, PyArray1<u8>> {
        self.inner.generate(n, seed).into_pyarray(py)
    }
}

/// ClosedFormRenewal — Python-facing wrapper for the algebraic `n = 3` renewal.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "ClosedFormRenewal", module = "synthetic_timeseries.stochastic_processes")]
pub struct PyClosedFormRenewal {
    inner: ClosedFormRenewal,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyClosedFormRenewal {
    #[new]
    pub fn new() -> Self {
        PyClosedFormRenewal { inner: ClosedFormRenewal::new() }
    }

    /// Generate `n` arrival indicators in {0, 1}.
    #[pyo3(signature = (n, seed = None), text_signature = "(n, /, seed=None)")]
    pub fn generate<'py>(&self, py: Python<'py>, n: usize, seed: Option<u64>) -> Bound<'py, PyArray1<u8>> {
        self.inner.generate(n, seed).into_pyarray(py)
    }
}

/// SequentialSplit — Python-facing walk-forward splitter.
///
/// `SequentialSplit(sizes, show_progress=False).split(X)` returns the list of
/// partitions over `range(len(X))`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "SequentialSplit", module = "synthetic_timeseries.data")]
pub struct PySequentialSplit {
    inner: SequentialSplit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PySequentialSplit {
    #[new]
    #[pyo3(signature = (sizes, show_progress = false), text_signature = "(sizes, /, show_progress=False)")]
    pub fn new(sizes: Vec<usize>, show_progress: bool) -> Self {
        PySequentialSplit { inner: SequentialSplit::new(sizes, show_progress) }
    }

    #[getter]
    pub fn sizes(&self) -> Vec<usize> {
        self.inner.sizes().to_vec()
    }

    /// Number of partitions for `X`.
    pub fn get_n_splits(&self, x: &Bound<'_, PyAny>) -> PyResult<usize> {
        Ok(self.inner.n_splits(x.len()?))
    }

    /// All partitions for `X`.
    pub fn split(&self, x: &Bound<'_, PyAny>) -> PyResult<Vec<Vec<Vec<usize>>>> {
        Ok(self.inner.split(x.len()?).collect())
    }
}

/// Build a synthetic lagged dataset; keyword arguments are the process
/// parameters (e.g. `get_synthetic("ar1", 500, lags=3, seed=1, phi=0.5)`).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (process, n, lags = 0, seed = None, **params))]
pub fn get_synthetic<'py>(
    py: Python<'py>, process: &str, n: usize, lags: usize, seed: Option<u64>,
    params: Option<&Bound<'py, PyDict>>,
) -> PyResult<Bound<'py, PyDict>> {
    let params = extract_params(params)?;
    let data = synthetic::get_synthetic(process, n, lags, seed, params)?;
    columns_to_py(py, data.columns(), data.values())
}

/// Load a processed table as a `dict` of columns plus a `datetime` list.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (target, target_gap, maxlags, year, root = None),
    text_signature = "(target, target_gap, maxlags, year, /, root=None)"
)]
pub fn get_data<'py>(
    py: Python<'py>, target: &str, target_gap: usize, maxlags: usize, year: i32,
    root: Option<std::path::PathBuf>,
) -> PyResult<Bound<'py, PyDict>> {
    let frame = match root {
        Some(root) => loader::get_data_in(&root, target, target_gap, maxlags, year)?,
        None => loader::get_data(target, target_gap, maxlags, year)?,
    };
    let dict = columns_to_py(py, frame.columns(), frame.values())?;
    dict.set_item(loader::INDEX_COLUMN, datetimes_to_py(py, frame.index())?)?;
    Ok(dict)
}

/// _synthetic_timeseries — PyO3 module initializer for the Python extension.
///
/// Creates the `stochastic_processes` and `data` submodules, attaches them to
/// the parent module and registers them in `sys.modules` so they are
/// importable via dotted paths.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _synthetic_timeseries<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let processes_mod = PyModule::new(_py, "stochastic_processes")?;
    let data_mod = PyModule::new(_py, "data")?;
    stochastic_processes(_py, m, &processes_mod)?;
    data(_py, m, &data_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("synthetic_timeseries.stochastic_processes", processes_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("synthetic_timeseries.data", data_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn stochastic_processes<'py>(
    _py: Python, parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyTwoStateMarkovChain>()?;
    m.add_class::<PyAR1>()?;
    m.add_class::<PyCycleRandomWalk>()?;
    m.add_class::<PyRenewal>()?;
    m.add_class::<PyClosedFormRenewal>()?;
    parent.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn data<'py>(_py: Python, parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PySequentialSplit>()?;
    m.add_function(wrap_pyfunction!(get_synthetic, m)?)?;
    m.add_function(wrap_pyfunction!(get_data, m)?)?;
    parent.add_submodule(m)?;
    Ok(())
}
