//! Native library
//!
//! Plain value types with no knowledge of any scripting host. The public
//! surface is fixed by [`MathApi`] and [`StringUtilsApi`]; every binding
//! adapter translates against these traits, never against the concrete types,
//! so all adapters are guaranteed to expose the same operations.

pub mod math;
pub mod string_utils;

pub use math::Math;
pub use string_utils::{reverse_bytes, StringUtils};

/// Integer operations exposed as the `Math` class.
pub trait MathApi {
    /// `a + b`, wrapping on overflow.
    fn add(&self, a: i32, b: i32) -> i32;

    /// `a * b`, wrapping on overflow.
    fn multiply(&self, a: i32, b: i32) -> i32;
}

/// String operations exposed as the `StringUtils` class.
pub trait StringUtilsApi {
    /// Wrap `text` in literal square brackets.
    fn brackets(&self, text: &str) -> String;

    /// Return `text` with its element order reversed.
    fn reverse(&self, text: &str) -> String;
}
