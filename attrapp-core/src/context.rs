//! Script context values.
//!
//! Scripts receive a key-to-value context on every invocation. The value
//! space is deliberately closed (strings, numbers, booleans, and nested
//! mappings) so the contract between the host configuration and user
//! scripts stays checkable instead of an open-ended dynamic bag.

use std::collections::BTreeMap;

/// A single context value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// A string value.
    String(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A nested mapping.
    Map(BTreeMap<String, ScriptValue>),
}

/// The context mapping handed to a script on each invocation.
///
/// The registry owns one "extended" context and clones it per invocation, so
/// a script mutating its copy cannot leak state into other scripts or later
/// requests.
pub type ScriptContext = BTreeMap<String, ScriptValue>;

// Common conversions
impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ScriptValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<BTreeMap<String, ScriptValue>> for ScriptValue {
    fn from(value: BTreeMap<String, ScriptValue>) -> Self {
        Self::Map(value)
    }
}

impl ScriptValue {
    /// Borrow the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the nested mapping, if this is a map value.
    pub fn as_map(&self) -> Option<&BTreeMap<String, ScriptValue>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}
