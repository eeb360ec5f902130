//! test_project Python bindings - Rust core
//!
//! A small native library exposed to a dynamic host runtime through
//! interchangeable binding adapters.
//!
//! # Architecture
//!
//! - **native**: The native library (`Math`, `StringUtils`) and its fixed API traits
//! - **host**: Host object model (values, classes, modules) and the module registrar
//! - **adapters**: Binding adapters projecting the native API into the host model
//! - **init**: Host initializer strategies (legacy / modern)
//! - **config**: Binding configuration
//! - **ffi**: PyO3 extension modules (feature `pyo3`)
//!
//! # Critical Invariants
//!
//! 1. Native methods are total: no panics, integer overflow wraps
//! 2. All adapters expose identical behavior for identical inputs
//! 3. A module is published at most once per registry, and never partially

// Module declarations
pub mod adapters;
pub mod config;
pub mod host;
pub mod init;
pub mod native;

// Re-exports for convenience
pub use adapters::{AdapterKind, BindingAdapter, LightweightAdapter, ReflectiveAdapter, WrapModule};
pub use config::{BindingConfig, ConfigError};
pub use host::{
    CallError, ClassDescriptor, ModuleDef, ModuleManifest, ModuleRegistry, ModuleState, Object,
    RegistrationError, Value,
};
pub use init::InitStrategy;
pub use native::{reverse_bytes, Math, MathApi, StringUtils, StringUtilsApi};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn test_project_pywrap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::init_lightweight(m)
}

#[cfg(feature = "pyo3")]
#[pymodule]
fn test_project_pywrap_bp(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::init_reflective(m)
}

#[cfg(feature = "pyo3")]
#[pymodule]
fn wrap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::init_wrap(m)
}
