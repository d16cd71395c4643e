use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar that may arrive as either an integer or a string.
///
/// Validators echo the value back unchanged, so an integer in stays an
/// integer out and a numeric string stays a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    /// Integer view of the value, parsing numeric strings
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(s) => s.trim().parse::<i64>().ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Convert a JSON/Tera value; only numbers with an integer form and strings qualify
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Int),
            serde_json::Value::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Str(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for IntOrString {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for IntOrString {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for IntOrString {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_int() {
        assert_eq!(IntOrString::from(7).as_int(), Some(7));
        assert_eq!(IntOrString::from("32").as_int(), Some(32));
        assert_eq!(IntOrString::from("-1").as_int(), Some(-1));
        assert_eq!(IntOrString::from("nope").as_int(), None);
        assert_eq!(IntOrString::from("1 1").as_int(), None);
    }

    #[test]
    fn test_untagged_serde() {
        let v: IntOrString = serde_json::from_str("445").unwrap();
        assert_eq!(v, IntOrString::Int(445));
        let v: IntOrString = serde_json::from_str("\"445\"").unwrap();
        assert_eq!(v, IntOrString::Str("445".into()));
    }
}
