//! Host runtime object model
//!
//! Adapters do not talk to an interpreter directly. They describe classes and
//! modules in this model, and the [`ModuleRegistry`] publishes the result. The
//! Python bridge (`ffi`) then projects published modules into CPython.
//!
//! # Critical Invariants
//!
//! 1. A module is registered at most once per registry
//! 2. A failed registration publishes nothing
//! 3. Published modules are immutable

pub mod class;
pub mod module;
pub mod registry;
pub mod value;

pub use class::{CallError, ClassBuilder, ClassDescriptor, MethodEntry, Object, Receiver};
pub use module::{
    ClassManifest, MethodManifest, ModuleBuilder, ModuleDef, ModuleManifest, RegistrationError,
};
pub use registry::{ModuleRegistry, ModuleState};
pub use value::{FromValue, IntoValue, Value};
