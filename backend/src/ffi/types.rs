//! Type conversion utilities for FFI boundary
//!
//! Converts between host [`Value`]s and Python objects, and maps Rust errors
//! onto Python exception types.

use pyo3::exceptions::{PyAttributeError, PyImportError, PyOverflowError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyLong, PyString};

use crate::host::class::CallError;
use crate::host::module::RegistrationError;
use crate::host::value::Value;

/// Convert a Python object into a host value.
///
/// # Errors
///
/// - `OverflowError` for ints outside the 64-bit range
/// - `TypeError` for anything that is not None, bool, int or str
pub fn value_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::None);
    }
    // bool first: it is a subclass of int
    if let Ok(flag) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(flag.is_true()));
    }
    if obj.is_instance_of::<PyLong>() {
        return Ok(Value::Int(obj.extract::<i64>()?));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::Str(obj.extract::<String>()?));
    }
    Err(PyErr::new::<PyTypeError, _>(format!(
        "unsupported argument type: {}",
        obj.get_type()
    )))
}

/// Convert a host value into a Python object.
pub fn value_into_py(py: Python<'_>, value: Value) -> PyObject {
    match value {
        Value::None => py.None(),
        Value::Bool(flag) => flag.into_py(py),
        Value::Int(n) => n.into_py(py),
        Value::Str(text) => text.into_py(py),
    }
}

impl From<CallError> for PyErr {
    fn from(err: CallError) -> Self {
        let message = err.to_string();
        match err {
            CallError::UnknownMethod { .. } | CallError::UnknownSymbol { .. } => {
                PyErr::new::<PyAttributeError, _>(message)
            }
            CallError::Overflow { .. } => PyErr::new::<PyOverflowError, _>(message),
            CallError::Arity { .. }
            | CallError::KeywordArguments { .. }
            | CallError::TypeMismatch { .. }
            | CallError::NotConstructible(_)
            | CallError::Receiver { .. } => PyErr::new::<PyTypeError, _>(message),
        }
    }
}

impl From<RegistrationError> for PyErr {
    fn from(err: RegistrationError) -> Self {
        PyErr::new::<PyImportError, _>(err.to_string())
    }
}
