//! Host initializer strategies
//!
//! Host interpreters have used two generations of extension entry points:
//!
//! - **Legacy**: a single `init<name>` function that creates the module from a
//!   name and a method table. There is no slot for a module docstring.
//! - **Modern**: `PyInit_<name>` returning a module built from a definition
//!   struct (name, doc, per-module state size, methods).
//!
//! Which one applies is fixed per build, so it is a plain tagged value carried
//! by the registry rather than something decided at call time.

use serde::{Deserialize, Serialize};

/// Initializer generation used when publishing modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStrategy {
    Legacy,
    Modern,
}

impl InitStrategy {
    /// Strategy selected by the `legacy-abi` cargo feature.
    pub const fn for_build() -> Self {
        if cfg!(feature = "legacy-abi") {
            InitStrategy::Legacy
        } else {
            InitStrategy::Modern
        }
    }

    /// Name of the exported initializer for `module`.
    ///
    /// # Example
    /// ```
    /// use test_project_pywrap::InitStrategy;
    ///
    /// assert_eq!(InitStrategy::Legacy.entry_symbol("wrap"), "initwrap");
    /// assert_eq!(InitStrategy::Modern.entry_symbol("wrap"), "PyInit_wrap");
    /// ```
    pub fn entry_symbol(self, module: &str) -> String {
        match self {
            InitStrategy::Legacy => format!("init{}", module),
            InitStrategy::Modern => format!("PyInit_{}", module),
        }
    }

    /// Whether the module definition has room for a docstring.
    pub fn carries_doc(self) -> bool {
        matches!(self, InitStrategy::Modern)
    }
}

impl Default for InitStrategy {
    fn default() -> Self {
        Self::for_build()
    }
}
