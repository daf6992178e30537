use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Value
///
/// Literal values usable in filter clauses, patches, and identity matching.
/// The set is restricted to what a JSON wire can carry losslessly.
///
/// `Null` means the field holds no value (Option::None on the entity).
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    List(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    // Numeric widening for cross-width comparison. Values outside the f64
    // mantissa lose precision; query literals stay well below that range.
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Uint(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Compare two values with native ordering.
    ///
    /// Numbers compare across `Int`/`Uint`/`Float` widths; text and bools
    /// compare within their own kind. Mismatched kinds (and NaN) return
    /// `None` rather than an arbitrary order.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }

    /// Equality with the same cross-width semantics as [`Self::compare`].
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match self.compare(other) {
            Some(ordering) => ordering == Ordering::Equal,
            None => self == other,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Uint(u64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_widths() {
        assert_eq!(
            Value::Int(3).compare(&Value::Uint(3)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Value::Uint(2).compare(&Value::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Float(4.0).compare(&Value::Int(3)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn mismatched_kinds_do_not_order() {
        assert_eq!(Value::Text("1".to_string()).compare(&Value::Int(1)), None);
        assert_eq!(Value::Bool(true).compare(&Value::Uint(1)), None);
    }

    #[test]
    fn equals_follows_compare_for_numbers() {
        assert!(Value::Int(7).equals(&Value::Uint(7)));
        assert!(!Value::Int(7).equals(&Value::Uint(8)));
        assert!(Value::Null.equals(&Value::Null));
        assert!(!Value::Null.equals(&Value::Int(0)));
    }

    #[test]
    fn lists_fall_back_to_structural_equality() {
        let a = Value::List(vec![Value::Int(1), Value::Text("x".to_string())]);
        let b = Value::List(vec![Value::Int(1), Value::Text("x".to_string())]);
        assert!(a.equals(&b));
    }

    #[test]
    fn untagged_serde_round_trips() {
        let value = Value::List(vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(-4),
            Value::Text("hi".to_string()),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
