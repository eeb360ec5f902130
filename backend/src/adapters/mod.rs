//! Binding adapters
//!
//! An adapter declares, for each exposed class, its construction policy and
//! the `(method name, entry point)` pairs that translate host values into
//! native calls. Two interchangeable adapters target the same native traits:
//!
//! - [`ReflectiveAdapter`]: generic class builder with automatic argument
//!   conversion through [`FromValue`](crate::host::FromValue)
//! - [`LightweightAdapter`]: hand-written monomorphic entry points
//!
//! Both must expose behaviorally identical surfaces.

pub mod lightweight;
pub mod reflective;

use serde::{Deserialize, Serialize};

use crate::host::module::{ModuleBuilder, RegistrationError};

pub use lightweight::LightweightAdapter;
pub use reflective::{Class, IntoMethod, ReflectiveAdapter};

/// Module name published by the lightweight adapter.
pub const LIGHTWEIGHT_MODULE: &str = "test_project_pywrap";

/// Module name published by the reflective adapter.
pub const REFLECTIVE_MODULE: &str = "test_project_pywrap_bp";

/// Module name of the empty extension module.
pub const WRAP_MODULE: &str = "wrap";

/// Projection of a native library into a host module
pub trait BindingAdapter {
    /// Name the module is published under by default.
    fn module_name(&self) -> &str;

    /// Module docstring, if any.
    fn doc(&self) -> Option<&str> {
        None
    }

    /// Declare every exposed symbol into the staged module.
    ///
    /// Returning an error aborts the whole registration.
    fn bind(&self, module: &mut ModuleBuilder) -> Result<(), RegistrationError>;
}

/// Selects one of the built-in adapters by value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    #[default]
    Lightweight,
    Reflective,
}

impl AdapterKind {
    pub fn module_name(self) -> &'static str {
        match self {
            AdapterKind::Lightweight => LIGHTWEIGHT_MODULE,
            AdapterKind::Reflective => REFLECTIVE_MODULE,
        }
    }

    /// Adapter over the bundled native library.
    pub fn adapter(self) -> Box<dyn BindingAdapter> {
        match self {
            AdapterKind::Lightweight => Box::new(LightweightAdapter::new()),
            AdapterKind::Reflective => Box::new(ReflectiveAdapter::new()),
        }
    }
}

/// The empty `wrap` extension module: a name and no symbols
#[derive(Debug, Default, Clone, Copy)]
pub struct WrapModule;

impl BindingAdapter for WrapModule {
    fn module_name(&self) -> &str {
        WRAP_MODULE
    }

    fn bind(&self, _module: &mut ModuleBuilder) -> Result<(), RegistrationError> {
        Ok(())
    }
}
