//! Module registrar
//!
//! Every module moves through a one-way state machine:
//!
//! ```text
//! UNREGISTERED --import--> REGISTERED
//! ```
//!
//! The transition builds the whole symbol table in a staging
//! [`ModuleBuilder`] and publishes it in one step. If the adapter fails while
//! binding, the staged table is dropped and the module stays UNREGISTERED.
//!
//! The registry is an ordinary value owned by whoever drives the imports.
//! Independent registries never share state, which keeps repeated
//! initialization in tests trivial.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, warn};

use super::class::ClassDescriptor;
use super::module::{validate_identifier, ModuleBuilder, ModuleDef, RegistrationError};
use crate::adapters::BindingAdapter;
use crate::init::InitStrategy;

/// Registration state of one module name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    Unregistered,
    Registered,
}

/// Table of published modules
///
/// # Example
/// ```
/// use test_project_pywrap::{InitStrategy, LightweightAdapter, ModuleRegistry, Value};
///
/// let mut registry = ModuleRegistry::new(InitStrategy::Modern);
/// let module = registry.import(&LightweightAdapter::new()).unwrap();
///
/// let math = module.instantiate("Math").unwrap();
/// assert_eq!(math.call("add", &[Value::Int(2), Value::Int(3)]), Ok(Value::Int(5)));
/// ```
#[derive(Debug)]
pub struct ModuleRegistry {
    strategy: InitStrategy,
    modules: BTreeMap<String, Arc<ModuleDef>>,
}

impl ModuleRegistry {
    /// Create an empty registry whose modules use `strategy`.
    pub fn new(strategy: InitStrategy) -> Self {
        Self {
            strategy,
            modules: BTreeMap::new(),
        }
    }

    /// Empty registry using the initializer selected at build time.
    pub fn for_build() -> Self {
        Self::new(InitStrategy::for_build())
    }

    pub fn strategy(&self) -> InitStrategy {
        self.strategy
    }

    /// Import the adapter's module under its default name.
    pub fn import(
        &mut self,
        adapter: &dyn BindingAdapter,
    ) -> Result<Arc<ModuleDef>, RegistrationError> {
        self.import_as(adapter.module_name(), adapter)
    }

    /// Import the adapter's module under `name`.
    ///
    /// Importing an already registered name returns the published table
    /// unchanged, whatever adapter is passed.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if `name` is not an identifier
    /// - any error the adapter reports while binding; nothing is published
    pub fn import_as(
        &mut self,
        name: &str,
        adapter: &dyn BindingAdapter,
    ) -> Result<Arc<ModuleDef>, RegistrationError> {
        if let Some(existing) = self.modules.get(name) {
            debug!("module '{}' already registered, reusing table", name);
            return Ok(Arc::clone(existing));
        }

        validate_identifier(name)?;

        let mut staged = ModuleBuilder::new(name);
        if let Some(doc) = adapter.doc() {
            staged.set_doc(doc);
        }

        if let Err(e) = adapter.bind(&mut staged) {
            warn!("registration of module '{}' aborted: {}", name, e);
            return Err(e);
        }

        let module = Arc::new(staged.finish(self.strategy));
        debug!(
            "registered module '{}' via {} ({} symbols)",
            name,
            module.entry_symbol(),
            module.len()
        );
        self.modules.insert(name.to_string(), Arc::clone(&module));
        Ok(module)
    }

    /// Initializer in the failure-sentinel style: `None` instead of an error.
    pub fn entry_point(&mut self, adapter: &dyn BindingAdapter) -> Option<Arc<ModuleDef>> {
        match self.import(adapter) {
            Ok(module) => Some(module),
            Err(e) => {
                warn!(
                    "{} returned no module: {}",
                    self.strategy.entry_symbol(adapter.module_name()),
                    e
                );
                None
            }
        }
    }

    pub fn state(&self, name: &str) -> ModuleState {
        if self.modules.contains_key(name) {
            ModuleState::Registered
        } else {
            ModuleState::Unregistered
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<ModuleDef>> {
        self.modules.get(name).cloned()
    }

    /// Resolve `module.symbol`.
    pub fn lookup(&self, module: &str, symbol: &str) -> Option<Arc<ClassDescriptor>> {
        self.modules.get(module)?.class(symbol).cloned()
    }

    /// Registered module names in sorted order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::for_build()
    }
}
