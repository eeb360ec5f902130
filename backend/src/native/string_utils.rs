//! String utilities

use serde::{Deserialize, Serialize};

use super::StringUtilsApi;

/// Stateless string helpers
///
/// `reverse` works on Unicode scalar values so the result is always valid
/// UTF-8. For ASCII input this is identical to reversing bytes; callers that
/// need the raw byte-wise behavior use [`reverse_bytes`].
///
/// # Example
/// ```
/// use test_project_pywrap::{StringUtils, StringUtilsApi};
///
/// let utils = StringUtils;
/// assert_eq!(utils.brackets("text"), "[text]");
/// assert_eq!(utils.reverse("abc"), "cba");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringUtils;

impl StringUtilsApi for StringUtils {
    fn brackets(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('[');
        out.push_str(text);
        out.push(']');
        out
    }

    fn reverse(&self, text: &str) -> String {
        text.chars().rev().collect()
    }
}

/// Reverse a byte sequence element by element.
///
/// Multi-byte UTF-8 sequences are not kept together, so the output is only
/// guaranteed to be valid UTF-8 when the input is ASCII.
pub fn reverse_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().rev().copied().collect()
}
