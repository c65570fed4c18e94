//! utils — conversions at the Python boundary.
//!
//! Keyword arguments arrive from Python as loosely typed scalars; they are
//! normalized into a `serde_json` map so that the same [`ProcessSpec`]
//! deserializer backs JSON configuration and Python calls alike.
//!
//! [`ProcessSpec`]: crate::processes::ProcessSpec
#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyBool, PyDict, PyFloat, PyInt, PyList},
};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

use serde_json::{Map, Number, Value};

use crate::dataset::errors::{DatasetError, DatasetResult};

/// A scalar keyword parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl ParamValue {
    fn into_json(self, name: &str) -> DatasetResult<Value> {
        match self {
            ParamValue::Bool(b) => Ok(Value::Bool(b)),
            ParamValue::Int(i) => Ok(Value::from(i)),
            ParamValue::Float(x) => Number::from_f64(x).map(Value::Number).ok_or_else(|| {
                DatasetError::InvalidConfig { reason: format!("parameter {name} must be finite, got {x}") }
            }),
        }
    }
}

/// Collect named scalars into a keyword map.
///
/// # Errors
/// Returns [`DatasetError::InvalidConfig`] for non-finite floats, which JSON
/// cannot represent.
pub fn params_map<I, K>(pairs: I) -> DatasetResult<Map<String, Value>>
where
    I: IntoIterator<Item = (K, ParamValue)>,
    K: Into<String>,
{
    let mut map = Map::new();
    for (name, value) in pairs {
        let name = name.into();
        let json = value.into_json(&name)?;
        map.insert(name, json);
    }
    Ok(map)
}

/// Read a Python `**kwargs` dictionary of scalars into a keyword map.
#[cfg(feature = "python-bindings")]
pub fn extract_params(kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<Map<String, Value>> {
    let Some(kwargs) = kwargs else {
        return Ok(Map::new());
    };

    let mut pairs = Vec::with_capacity(kwargs.len());
    for (key, value) in kwargs.iter() {
        let name: String = key.extract()?;
        let param = if value.is_instance_of::<PyBool>() {
            ParamValue::Bool(value.extract()?)
        } else if value.is_instance_of::<PyInt>() {
            ParamValue::Int(value.extract()?)
        } else if value.is_instance_of::<PyFloat>() {
            ParamValue::Float(value.extract()?)
        } else {
            // numpy scalars and other numbers.
            ParamValue::Float(value.extract().map_err(|_| {
                PyTypeError::new_err(format!("parameter {name} must be a number"))
            })?)
        };
        pairs.push((name, param));
    }
    Ok(params_map(pairs)?)
}

/// Copy a row-major matrix into a `numpy.ndarray`.
#[cfg(feature = "python-bindings")]
pub fn matrix_to_py<'py>(py: Python<'py>, values: &Array2<f64>) -> Bound<'py, PyArray2<f64>> {
    values.clone().into_pyarray(py)
}

/// Columnar `dict` of `name -> numpy.ndarray`, directly consumable by
/// `pandas.DataFrame`.
#[cfg(feature = "python-bindings")]
pub fn columns_to_py<'py>(
    py: Python<'py>, columns: &[String], values: &Array2<f64>,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (j, name) in columns.iter().enumerate() {
        dict.set_item(name, values.column(j).to_owned().into_pyarray(py))?;
    }
    Ok(dict)
}

/// Python list of ISO-8601 strings.
#[cfg(feature = "python-bindings")]
pub fn datetimes_to_py<'py>(
    py: Python<'py>, index: &[chrono::NaiveDateTime],
) -> PyResult<Bound<'py, PyList>> {
    PyList::new(py, index.iter().map(|t| t.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn params_map_keeps_integer_and_float_kinds() {
        let map = params_map([("vertices", ParamValue::Int(5)), ("b", ParamValue::Float(0.2))]).unwrap();
        assert_eq!(Value::Object(map), json!({"vertices": 5, "b": 0.2}));
    }

    #[test]
    fn params_map_rejects_non_finite_floats() {
        assert!(matches!(
            params_map([("phi", ParamValue::Float(f64::NAN))]),
            Err(DatasetError::InvalidConfig { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Keyword maps built here feed straight into dataset generation.
    fn params_map_drives_get_synthetic() {
        let params = params_map([("p", ParamValue::Float(0.3)), ("q", ParamValue::Float(0.4))]).unwrap();
        let data = crate::dataset::get_synthetic("two_state_markov_chain", 20, 1, Some(3), params).unwrap();
        assert_eq!(data.n_rows(), 20);
    }
}
