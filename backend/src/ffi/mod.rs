//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings publishing the native library as CPython extension modules:
//!
//! - `test_project_pywrap`: the lightweight adapter's module
//! - `test_project_pywrap_bp`: the reflective adapter's module
//! - `wrap`: an empty module
//!
//! Each initializer imports its adapter into a [`ModuleRegistry`] and projects
//! the published table through the classes in [`dynamic`], so both adapters
//! present one Python surface.
//!
//! Only the modern `PyInit_<name>` initializer exists here; the legacy
//! generation is modelled by [`InitStrategy::Legacy`] but cannot be built
//! through pyo3.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: ints, strings and bools cross, nothing else
//! 2. **Safe errors**: every Rust error becomes a Python exception
//! 3. **No partial modules**: registration completes before any symbol is set

pub mod dynamic;
pub mod types;

use pyo3::prelude::*;

use crate::adapters::{BindingAdapter, LightweightAdapter, ReflectiveAdapter, WrapModule};
use crate::host::registry::ModuleRegistry;
use crate::init::InitStrategy;

#[cfg(feature = "legacy-abi")]
compile_error!("the legacy module initializer cannot be built through pyo3; disable `legacy-abi`");

/// Import `adapter` into a fresh registry and publish it on `m`.
///
/// The registry is local to this call: CPython runs the initializer once and
/// caches the module in `sys.modules`.
fn publish_adapter(m: &Bound<'_, PyModule>, adapter: &dyn BindingAdapter) -> PyResult<()> {
    let mut registry = ModuleRegistry::new(InitStrategy::Modern);
    let module = registry.import(adapter)?;
    dynamic::publish(m, &module)
}

/// Populate the `test_project_pywrap` module.
pub fn init_lightweight(m: &Bound<'_, PyModule>) -> PyResult<()> {
    publish_adapter(m, &LightweightAdapter::new())
}

/// Populate the `test_project_pywrap_bp` module.
pub fn init_reflective(m: &Bound<'_, PyModule>) -> PyResult<()> {
    publish_adapter(m, &ReflectiveAdapter::new())
}

/// Populate the empty `wrap` module.
pub fn init_wrap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    publish_adapter(m, &WrapModule)
}
