//! Dynamic host values
//!
//! The host runtime is dynamically typed; everything crossing an adapter
//! boundary travels as a [`Value`]. Narrowing to native types happens here so
//! that every adapter applies identical conversion rules.

use serde::{Deserialize, Serialize};

use super::class::CallError;

/// A value as seen by the host runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Host-facing type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
        }
    }

    /// Read an integer. Booleans count as integers, as in the host.
    pub fn as_int(&self) -> Result<i64, CallError> {
        match self {
            Value::Int(value) => Ok(*value),
            Value::Bool(flag) => Ok(i64::from(*flag)),
            other => Err(CallError::TypeMismatch {
                expected: "int",
                found: other.type_name(),
            }),
        }
    }

    /// Read an integer that must fit a native `i32`.
    pub fn as_i32(&self) -> Result<i32, CallError> {
        let value = self.as_int()?;
        i32::try_from(value).map_err(|_| CallError::Overflow {
            value,
            target: "i32",
        })
    }

    pub fn as_str(&self) -> Result<&str, CallError> {
        match self {
            Value::Str(text) => Ok(text),
            other => Err(CallError::TypeMismatch {
                expected: "str",
                found: other.type_name(),
            }),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_owned())
    }
}

/// Conversion from a host value into a native argument
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, CallError>;
}

/// Conversion from a native return value into a host value
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl<T: Into<Value>> IntoValue for T {
    fn into_value(self) -> Value {
        self.into()
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        value.as_i32()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        value.as_int()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        match value {
            Value::Bool(flag) => Ok(*flag),
            other => Err(CallError::TypeMismatch {
                expected: "bool",
                found: other.type_name(),
            }),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, CallError> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_narrowing() {
        assert_eq!(Value::Int(42).as_i32(), Ok(42));
        assert_eq!(Value::Bool(true).as_i32(), Ok(1));
        assert_eq!(
            Value::Int(i64::from(i32::MAX) + 1).as_i32(),
            Err(CallError::Overflow {
                value: 2_147_483_648,
                target: "i32"
            })
        );
    }

    #[test]
    fn test_type_mismatch_reports_host_names() {
        assert_eq!(
            Value::Str("x".into()).as_int(),
            Err(CallError::TypeMismatch {
                expected: "int",
                found: "str"
            })
        );
        assert_eq!(
            Value::None.as_str(),
            Err(CallError::TypeMismatch {
                expected: "str",
                found: "NoneType"
            })
        );
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Value::Int(5)).unwrap();
        assert_eq!(json, r#"{"type":"int","value":5}"#);
        let none = serde_json::to_string(&Value::None).unwrap();
        assert_eq!(none, r#"{"type":"none"}"#);
    }
}
