//! Class descriptors and host instances
//!
//! A [`ClassDescriptor`] is what a binding adapter produces for one exposed
//! native type: its exposed name, how instances are constructed and a table of
//! callable methods. Instances ([`Object`]) pair a descriptor with a
//! type-erased native receiver.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::module::{validate_identifier, RegistrationError};
use super::value::Value;

/// Type-erased native object behind a host instance.
pub type Receiver = dyn Any + Send + Sync;

/// Bound method entry point: receiver plus positional arguments.
pub type MethodFn = Arc<dyn Fn(&Receiver, &[Value]) -> Result<Value, CallError> + Send + Sync>;

/// Default constructor producing a fresh native receiver.
pub type ConstructorFn = Arc<dyn Fn() -> Arc<Receiver> + Send + Sync>;

/// Errors raised while calling into an exposed class
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("'{class}' object has no attribute '{method}'")]
    UnknownMethod { class: String, method: String },

    #[error("module '{module}' has no attribute '{symbol}'")]
    UnknownSymbol { module: String, symbol: String },

    #[error("{class}.{method}() takes {expected} positional arguments but {got} were given")]
    Arity {
        class: String,
        method: String,
        expected: usize,
        got: usize,
    },

    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{class}.{method}() takes no keyword arguments")]
    KeywordArguments { class: String, method: String },

    #[error("integer {value} does not fit in {target}")]
    Overflow { value: i64, target: &'static str },

    #[error("cannot create '{0}' instances")]
    NotConstructible(String),

    #[error("receiver is not a {expected}")]
    Receiver { expected: &'static str },
}

/// A registered method: its arity and entry point
#[derive(Clone)]
pub struct MethodEntry {
    arity: usize,
    call: MethodFn,
}

impl MethodEntry {
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Debug for MethodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodEntry")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Exposed class: name, construction policy and method table
pub struct ClassDescriptor {
    name: String,
    constructor: Option<ConstructorFn>,
    methods: BTreeMap<String, MethodEntry>,
}

impl ClassDescriptor {
    /// Start describing a class exposed as `name`.
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            constructor: None,
            methods: BTreeMap::new(),
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the host may create instances (`Class()`).
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    pub fn method(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.get(name)
    }

    /// Method names in sorted order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn methods(&self) -> impl Iterator<Item = (&str, &MethodEntry)> {
        self.methods.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("constructible", &self.is_constructible())
            .field("methods", &self.methods)
            .finish()
    }
}

/// Incremental construction of a [`ClassDescriptor`]
///
/// The first invalid declaration is remembered and reported by
/// [`ClassBuilder::build`], so declarations can be chained without
/// intermediate error handling.
pub struct ClassBuilder {
    name: String,
    constructor: Option<ConstructorFn>,
    methods: BTreeMap<String, MethodEntry>,
    error: Option<RegistrationError>,
}

impl ClassBuilder {
    /// Make the class default-constructible.
    pub fn constructor<F>(mut self, construct: F) -> Self
    where
        F: Fn() -> Arc<Receiver> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(construct));
        self
    }

    /// Remove any constructor; the host can no longer create instances.
    pub fn no_init(mut self) -> Self {
        self.constructor = None;
        self
    }

    /// Declare a method taking `arity` positional arguments.
    pub fn method<F>(self, name: &str, arity: usize, call: F) -> Self
    where
        F: Fn(&Receiver, &[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        self.method_fn(name, arity, Arc::new(call))
    }

    /// Declare a method from an already type-erased entry point.
    pub fn method_fn(mut self, name: &str, arity: usize, call: MethodFn) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(e) = validate_identifier(name) {
            self.error = Some(e);
            return self;
        }
        if self.methods.contains_key(name) {
            self.error = Some(RegistrationError::DuplicateMethod {
                class: self.name.clone(),
                method: name.to_string(),
            });
            return self;
        }
        self.methods.insert(name.to_string(), MethodEntry { arity, call });
        self
    }

    pub fn build(self) -> Result<ClassDescriptor, RegistrationError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        validate_identifier(&self.name)?;
        Ok(ClassDescriptor {
            name: self.name,
            constructor: self.constructor,
            methods: self.methods,
        })
    }
}

/// Host instance of an exposed class
#[derive(Clone)]
pub struct Object {
    class: Arc<ClassDescriptor>,
    receiver: Arc<Receiver>,
}

impl Object {
    /// Construct an instance through the class's constructor.
    pub fn new(class: Arc<ClassDescriptor>) -> Result<Self, CallError> {
        let receiver = match &class.constructor {
            Some(construct) => construct(),
            None => return Err(CallError::NotConstructible(class.name.clone())),
        };
        Ok(Self { class, receiver })
    }

    pub fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.class.method(name).is_some()
    }

    /// Call `method` with positional `args`.
    ///
    /// # Errors
    ///
    /// - `UnknownMethod` if the class exposes no such method
    /// - `Arity` if the argument count differs from the declaration
    /// - conversion errors reported by the entry point
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value, CallError> {
        let entry = self
            .class
            .method(method)
            .ok_or_else(|| CallError::UnknownMethod {
                class: self.class.name.clone(),
                method: method.to_string(),
            })?;

        if args.len() != entry.arity {
            return Err(CallError::Arity {
                class: self.class.name.clone(),
                method: method.to_string(),
                expected: entry.arity,
                got: args.len(),
            });
        }

        (entry.call)(&*self.receiver, args)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class.name)
            .finish_non_exhaustive()
    }
}
