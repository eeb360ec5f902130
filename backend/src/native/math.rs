//! Integer arithmetic
//!
//! Mirrors a C++ `int` on every supported target: 32-bit two's complement,
//! overflow wraps instead of panicking (debug builds included).

use serde::{Deserialize, Serialize};

use super::MathApi;

/// Stateless integer arithmetic
///
/// # Example
/// ```
/// use test_project_pywrap::{Math, MathApi};
///
/// let math = Math;
/// assert_eq!(math.add(2, 3), 5);
/// assert_eq!(math.multiply(2, 3), 6);
/// assert_eq!(math.add(i32::MAX, 1), i32::MIN);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Math;

impl MathApi for Math {
    fn add(&self, a: i32, b: i32) -> i32 {
        a.wrapping_add(b)
    }

    fn multiply(&self, a: i32, b: i32) -> i32 {
        a.wrapping_mul(b)
    }
}
