//! Atomic values shared by the AST and the predicate tree

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Bare word, e.g. `published` in `status:published`
    Identifier(String),
    /// Exact decimal literal
    Number(Decimal),
    /// Lowercase `true` / `false`
    Boolean(bool),
    /// Double-quoted text with the quotes stripped
    QuotedString(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Identifier(_) | Value::QuotedString(_) => ValueKind::Text,
            Value::Number(_) => ValueKind::Number,
            Value::Boolean(_) => ValueKind::Boolean,
        }
    }

    /// Text content of identifier and quoted values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Identifier(s) | Value::QuotedString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Order two values of the same kind.
    ///
    /// Returns `None` across kinds. Identifier and quoted text compare by
    /// content, so `status:draft` equals a stored `"draft"`.
    pub fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => match (self.as_text(), other.as_text()) {
                (Some(a), Some(b)) => Some(a.cmp(b)),
                _ => None,
            },
        }
    }

    /// Equality by kind and content, ignoring the identifier/quoted distinction
    pub fn same_as(&self, other: &Value) -> bool {
        self.partial_cmp_value(other) == Some(Ordering::Equal)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::QuotedString(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::QuotedString(s)
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Identifier(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::QuotedString(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Kind of a value, as declared per field in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Number,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => write!(f, "text"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Bounds of a `lower..upper` range.
///
/// Bounds are kept exactly as written; `50..10` is not reordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub lower: Value,
    pub upper: Value,
}

impl Range {
    pub fn new(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Inclusive containment; empty when `lower > upper`
    pub fn contains(&self, value: &Value) -> bool {
        matches!(
            self.lower.partial_cmp_value(value),
            Some(Ordering::Less | Ordering::Equal)
        ) && matches!(
            value.partial_cmp_value(&self.upper),
            Some(Ordering::Less | Ordering::Equal)
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lower, self.upper)
    }
}

/// Comparison operators of `field:>v`, `field:>=v`, `field:<v`, `field:<=v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Whether `ordering` (actual compared to expected) satisfies this operator
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Value::Identifier("x".into()).kind(), ValueKind::Text);
        assert_eq!(Value::QuotedString("x y".into()).kind(), ValueKind::Text);
        assert_eq!(Value::from(3).kind(), ValueKind::Number);
        assert_eq!(Value::from(true).kind(), ValueKind::Boolean);
    }

    #[test]
    fn test_text_compares_by_content() {
        let ident = Value::Identifier("draft".into());
        let quoted = Value::QuotedString("draft".into());
        assert!(ident.same_as(&quoted));
        assert_ne!(ident, quoted);
    }

    #[test]
    fn test_cross_kind_is_incomparable() {
        assert_eq!(Value::from(1).partial_cmp_value(&Value::from("1")), None);
        assert!(!Value::from(true).same_as(&Value::from(1)));
    }

    #[test]
    fn test_range_contains_inclusive() {
        let range = Range::new(10, 50);
        assert!(range.contains(&Value::from(10)));
        assert!(range.contains(&Value::from(50)));
        assert!(range.contains(&Value::from(25)));
        assert!(!range.contains(&Value::from(51)));
        assert!(!range.contains(&Value::from("25")));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = Range::new(50, 10);
        assert!(!range.contains(&Value::from(30)));
        assert!(!range.contains(&Value::from(10)));
    }

    #[test]
    fn test_compare_op_accepts() {
        assert!(CompareOp::Gt.accepts(Ordering::Greater));
        assert!(!CompareOp::Gt.accepts(Ordering::Equal));
        assert!(CompareOp::Gte.accepts(Ordering::Equal));
        assert!(CompareOp::Lt.accepts(Ordering::Less));
        assert!(CompareOp::Lte.accepts(Ordering::Equal));
        assert!(!CompareOp::Lte.accepts(Ordering::Greater));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Identifier("red".into()).to_string(), "red");
        assert_eq!(Value::QuotedString("red shoes".into()).to_string(), "\"red shoes\"");
        assert_eq!(Range::new(10, 50).to_string(), "10..50");
    }
}
