//! Module definitions
//!
//! A [`ModuleBuilder`] collects the classes an adapter declares; once the
//! adapter has finished binding, the builder is frozen into an immutable
//! [`ModuleDef`], the symbol table the host runtime sees.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::class::{CallError, ClassDescriptor, Object};
use crate::init::InitStrategy;

/// Errors that abort a module registration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("'{0}' is not a valid identifier")]
    InvalidName(String),

    #[error("module '{module}' already defines '{symbol}'")]
    DuplicateSymbol { module: String, symbol: String },

    #[error("class '{class}' already defines method '{method}'")]
    DuplicateMethod { class: String, method: String },

    #[error("initialization of module '{module}' failed: {reason}")]
    Aborted { module: String, reason: String },
}

/// Check that `name` is usable as a host identifier.
///
/// ASCII letter or underscore first, then ASCII alphanumerics or underscores.
pub fn validate_identifier(name: &str) -> Result<(), RegistrationError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(RegistrationError::InvalidName(name.to_string()))
    }
}

/// Staging area for a module's symbols
#[derive(Debug)]
pub struct ModuleBuilder {
    name: String,
    doc: Option<String>,
    classes: BTreeMap<String, Arc<ClassDescriptor>>,
}

impl ModuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            classes: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_doc(&mut self, doc: impl Into<String>) {
        self.doc = Some(doc.into());
    }

    /// Add a class under its descriptor name.
    ///
    /// # Errors
    ///
    /// `DuplicateSymbol` if the module already exposes that name.
    pub fn add_class(&mut self, class: ClassDescriptor) -> Result<(), RegistrationError> {
        if self.classes.contains_key(class.name()) {
            return Err(RegistrationError::DuplicateSymbol {
                module: self.name.clone(),
                symbol: class.name().to_string(),
            });
        }
        self.classes.insert(class.name().to_string(), Arc::new(class));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Freeze the staged symbols. Legacy initializers carry no module doc.
    pub fn finish(self, strategy: InitStrategy) -> ModuleDef {
        let doc = if strategy.carries_doc() { self.doc } else { None };
        ModuleDef {
            name: self.name,
            doc,
            strategy,
            classes: self.classes,
        }
    }
}

/// Immutable symbol table of a registered module
#[derive(Debug)]
pub struct ModuleDef {
    name: String,
    doc: Option<String>,
    strategy: InitStrategy,
    classes: BTreeMap<String, Arc<ClassDescriptor>>,
}

impl ModuleDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn strategy(&self) -> InitStrategy {
        self.strategy
    }

    /// Exported initializer symbol for this module.
    pub fn entry_symbol(&self) -> String {
        self.strategy.entry_symbol(&self.name)
    }

    pub fn class(&self, name: &str) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(name)
    }

    /// Exposed symbol names in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn classes(&self) -> impl Iterator<Item = &Arc<ClassDescriptor>> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Create an instance of the exposed class `name`, as `module.Name()` would.
    pub fn instantiate(&self, name: &str) -> Result<Object, CallError> {
        let class = self
            .classes
            .get(name)
            .ok_or_else(|| CallError::UnknownSymbol {
                module: self.name.clone(),
                symbol: name.to_string(),
            })?;
        Object::new(Arc::clone(class))
    }

    pub fn manifest(&self) -> ModuleManifest {
        ModuleManifest {
            name: self.name.clone(),
            doc: self.doc.clone(),
            strategy: self.strategy,
            entry_symbol: self.entry_symbol(),
            classes: self
                .classes
                .values()
                .map(|class| ClassManifest {
                    name: class.name().to_string(),
                    constructible: class.is_constructible(),
                    methods: class
                        .methods()
                        .map(|(name, entry)| MethodManifest {
                            name: name.to_string(),
                            arity: entry.arity(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Serializable snapshot of a module's exposed surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub strategy: InitStrategy,
    pub entry_symbol: String,
    pub classes: Vec<ClassManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassManifest {
    pub name: String,
    pub constructible: bool,
    pub methods: Vec<MethodManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodManifest {
    pub name: String,
    pub arity: usize,
}

impl ModuleManifest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
