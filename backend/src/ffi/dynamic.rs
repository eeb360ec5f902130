//! Registry-backed Python objects
//!
//! A published [`ModuleDef`] is projected into Python with three small
//! classes: calling a `BoundClass` constructs a `BoundObject`, attribute
//! access on it yields a `BoundMethod`, and calling that dispatches through
//! the class's method table.
//!
//! Every module goes through these same classes, so the Python-visible rules
//! (positional arguments only, `isinstance` against the exposed class,
//! exception types) do not depend on which adapter built the module.

use std::sync::Arc;

use pyo3::exceptions::PyAttributeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyTuple};

use super::types::{value_from_py, value_into_py};
use crate::host::class::{CallError, ClassDescriptor, Object};
use crate::host::module::ModuleDef;
use crate::host::value::Value;

/// Exposed class; calling it creates an instance
#[pyclass(name = "BoundClass", frozen)]
pub struct PyBoundClass {
    class: Arc<ClassDescriptor>,
}

#[pymethods]
impl PyBoundClass {
    fn __call__(&self) -> PyResult<PyBoundObject> {
        let object = Object::new(Arc::clone(&self.class))?;
        Ok(PyBoundObject { object })
    }

    /// `isinstance(obj, cls)`: true for instances created from this class.
    fn __instancecheck__(&self, obj: &Bound<'_, PyAny>) -> bool {
        obj.downcast::<PyBoundObject>()
            .map(|instance| Arc::ptr_eq(instance.get().object.class(), &self.class))
            .unwrap_or(false)
    }

    #[getter(__name__)]
    fn name(&self) -> String {
        self.class.name().to_string()
    }

    fn __repr__(&self) -> String {
        format!("<class '{}'>", self.class.name())
    }
}

/// Instance of an exposed class
#[pyclass(name = "BoundObject", frozen)]
pub struct PyBoundObject {
    object: Object,
}

#[pymethods]
impl PyBoundObject {
    fn __getattr__(&self, name: &str) -> PyResult<PyBoundMethod> {
        if !self.object.has_method(name) {
            return Err(PyErr::new::<PyAttributeError, _>(format!(
                "'{}' object has no attribute '{}'",
                self.object.class_name(),
                name
            )));
        }
        Ok(PyBoundMethod {
            object: self.object.clone(),
            name: name.to_string(),
        })
    }

    fn __repr__(&self) -> String {
        format!("<{} object>", self.object.class_name())
    }
}

/// Method bound to an instance
#[pyclass(name = "BoundMethod", frozen)]
pub struct PyBoundMethod {
    object: Object,
    name: String,
}

#[pymethods]
impl PyBoundMethod {
    #[pyo3(signature = (*args, **kwargs))]
    fn __call__(
        &self,
        py: Python<'_>,
        args: &Bound<'_, PyTuple>,
        kwargs: Option<&Bound<'_, PyDict>>,
    ) -> PyResult<PyObject> {
        if kwargs.is_some_and(|kwargs| !kwargs.is_empty()) {
            return Err(CallError::KeywordArguments {
                class: self.object.class_name().to_string(),
                method: self.name.clone(),
            }
            .into());
        }
        let values = args
            .iter()
            .map(|arg| value_from_py(&arg))
            .collect::<PyResult<Vec<Value>>>()?;
        let result = self.object.call(&self.name, &values)?;
        Ok(value_into_py(py, result))
    }
}

/// Set every symbol of `module` on the Python module `m`.
pub fn publish(m: &Bound<'_, PyModule>, module: &ModuleDef) -> PyResult<()> {
    if let Some(doc) = module.doc() {
        m.setattr("__doc__", doc)?;
    }
    for class in module.classes() {
        m.add(
            class.name(),
            PyBoundClass {
                class: Arc::clone(class),
            },
        )?;
    }
    Ok(())
}
