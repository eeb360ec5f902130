//! Binding configuration
//!
//! Selects which adapter publishes the native library, under which module
//! name, and with which initializer strategy. Every field has a default, so an
//! empty JSON object is a valid configuration.
//!
//! ```json
//! {
//!     "adapter": "reflective",
//!     "strategy": "modern",
//!     "module_name": "test_project_pywrap_bp"
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::AdapterKind;
use crate::host::module::{validate_identifier, ModuleDef, RegistrationError};
use crate::host::registry::ModuleRegistry;
use crate::init::InitStrategy;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid module name '{0}'")]
    InvalidModuleName(String),
}

/// Which adapter to load and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindingConfig {
    pub adapter: AdapterKind,
    pub strategy: InitStrategy,
    /// Overrides the adapter's default module name.
    pub module_name: Option<String>,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            adapter: AdapterKind::default(),
            strategy: InitStrategy::for_build(),
            module_name: None,
        }
    }
}

impl BindingConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// - `Parse` on malformed JSON, unknown fields or unknown enum values
    /// - `InvalidModuleName` if `module_name` is not an identifier
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BindingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.module_name {
            validate_identifier(name)
                .map_err(|_| ConfigError::InvalidModuleName(name.clone()))?;
        }
        Ok(())
    }

    /// Module name the configured adapter is published under.
    pub fn module_name(&self) -> &str {
        self.module_name
            .as_deref()
            .unwrap_or_else(|| self.adapter.module_name())
    }

    /// Empty registry using the configured strategy.
    pub fn registry(&self) -> ModuleRegistry {
        ModuleRegistry::new(self.strategy)
    }

    /// Import the configured adapter into `registry`.
    pub fn import_into(
        &self,
        registry: &mut ModuleRegistry,
    ) -> Result<Arc<ModuleDef>, RegistrationError> {
        let adapter = self.adapter.adapter();
        registry.import_as(self.module_name(), adapter.as_ref())
    }
}
