use serde::{Deserialize, Serialize};
use std::fmt;

/// A value passed to, or returned from, an exercise callable.
///
/// Equality is structural and exact: values of different variants are never
/// equal, so `Int(2) != Float(2.0)`, and floats compare without tolerance.
///
/// # Examples
///
/// ```rust
/// use drill::Value;
/// let s = Value::from("hello");
/// assert_eq!(s.type_name(), "str");
/// assert_eq!(s.repr(), "'hello'");
/// assert_eq!(s.to_string(), "hello");
/// assert_ne!(Value::Int(2), Value::Float(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Ints widen to floats; nothing else converts.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Renders the value for trace output: text is wrapped in single quotes
    /// and otherwise shown as given, everything else renders as its display
    /// form. List items are rendered
    /// the same way, so `['a', 1]` keeps its inner quotes.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("'{}'", s),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // Debug keeps the trailing `.0` on integral floats so they never
            // read like ints in a trace.
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(_) => write!(f, "{}", self.repr()),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_quoted_in_repr_only() {
        assert_eq!(Value::from("abc").repr(), "'abc'");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Int(10).repr(), "10");
        assert_eq!(Value::Bool(true).repr(), "true");
        assert_eq!(Value::Nil.repr(), "nil");
    }

    #[test]
    fn floats_keep_their_fraction() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(2.5).repr(), "2.5");
    }

    #[test]
    fn lists_quote_their_text_items() {
        let list = Value::List(vec![Value::from("a"), Value::Int(1)]);
        assert_eq!(list.repr(), "['a', 1]");
        assert_eq!(list.to_string(), "['a', 1]");
    }

    #[test]
    fn text_is_quoted_verbatim() {
        assert_eq!(Value::from("it's").repr(), "'it's'");
        assert_eq!(Value::from(r"a\b").repr(), r"'a\b'");
    }

    #[test]
    fn mismatched_variants_are_unequal() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::from("1"));
        assert_ne!(Value::Bool(true), Value::Int(1));
    }

    #[test]
    fn untagged_deserialization_picks_natural_variants() {
        let v: Value = serde_yaml::from_str("[1, 2.5, 'x', true, null]").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Bool(true),
                Value::Nil,
            ])
        );
    }
}
