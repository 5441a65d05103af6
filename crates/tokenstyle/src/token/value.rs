//! Token values: numbers or strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A flat, ordered token record.
///
/// Ordering is by key so that every output derived from a record (variable
/// declarations, identity hashes, statistics) is deterministic.
pub type TokenMap = BTreeMap<String, TokenValue>;

/// A single design-token value.
///
/// Numbers are kept unit-less; a unit is only attached when the value is
/// serialized into a style declaration or a variable block.
///
/// # Example
///
/// ```rust
/// use tokenstyle::TokenValue;
///
/// let size: TokenValue = 14.into();
/// let color: TokenValue = "#1677ff".into();
///
/// assert_eq!(size.to_string(), "14");
/// assert_eq!(color.as_str(), Some("#1677ff"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Str(String),
}

impl TokenValue {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            TokenValue::Str(_) => None,
        }
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Str(s) => Some(s),
            TokenValue::Number(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, TokenValue::Number(_))
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        TokenValue::Number(n)
    }
}

impl From<i32> for TokenValue {
    fn from(n: i32) -> Self {
        TokenValue::Number(f64::from(n))
    }
}

impl From<u32> for TokenValue {
    fn from(n: u32) -> Self {
        TokenValue::Number(f64::from(n))
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Str(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        TokenValue::Str(s)
    }
}

impl From<&TokenValue> for TokenValue {
    fn from(v: &TokenValue) -> Self {
        v.clone()
    }
}
