//! AST types for parsed filter queries

use serde::Serialize;
use std::fmt;

use crate::value::{CompareOp, Range, Value};

/// A parsed filter expression.
///
/// Field names and quoted text borrow the query string. Parentheses do not
/// appear in the tree; they only shape it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr<'a> {
    Or(Box<Expr<'a>>, Box<Expr<'a>>),
    And(Box<Expr<'a>>, Box<Expr<'a>>),
    Not(Box<Expr<'a>>),
    FieldEquals {
        field: &'a str,
        value: Value,
    },
    FieldRange {
        field: &'a str,
        range: Range,
    },
    FieldQuoted {
        field: &'a str,
        text: &'a str,
    },
    FieldCompare {
        field: &'a str,
        op: CompareOp,
        value: Value,
    },
}

impl<'a> Expr<'a> {
    pub fn or(left: Expr<'a>, right: Expr<'a>) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn and(left: Expr<'a>, right: Expr<'a>) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Expr<'a>) -> Self {
        Expr::Not(Box::new(operand))
    }

    pub fn equals(field: &'a str, value: impl Into<Value>) -> Self {
        Expr::FieldEquals {
            field,
            value: value.into(),
        }
    }

    /// Field name of a leaf, `None` for connectives
    pub fn field(&self) -> Option<&'a str> {
        match self {
            Expr::FieldEquals { field, .. }
            | Expr::FieldRange { field, .. }
            | Expr::FieldQuoted { field, .. }
            | Expr::FieldCompare { field, .. } => Some(*field),
            Expr::Or(..) | Expr::And(..) | Expr::Not(_) => None,
        }
    }

    /// Distinct field names in source order
    pub fn fields(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields(&self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Or(l, r) | Expr::And(l, r) => {
                l.collect_fields(out);
                r.collect_fields(out);
            }
            Expr::Not(e) => e.collect_fields(out),
            leaf => {
                if let Some(field) = leaf.field() {
                    if !out.contains(&field) {
                        out.push(field);
                    }
                }
            }
        }
    }

    pub fn references(&self, field: &str) -> bool {
        match self {
            Expr::Or(l, r) | Expr::And(l, r) => l.references(field) || r.references(field),
            Expr::Not(e) => e.references(field),
            leaf => leaf.field() == Some(field),
        }
    }

    /// Number of leaf comparisons
    pub fn leaf_count(&self) -> usize {
        match self {
            Expr::Or(l, r) | Expr::And(l, r) => l.leaf_count() + r.leaf_count(),
            Expr::Not(e) => e.leaf_count(),
            _ => 1,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Or(..) => 1,
            Expr::And(..) => 2,
            _ => 3,
        }
    }
}

fn write_child(f: &mut fmt::Formatter<'_>, child: &Expr<'_>, min: u8) -> fmt::Result {
    if child.precedence() < min {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

/// Renders canonical query text that parses back to the same tree.
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Or(l, r) => {
                write_child(f, l, 1)?;
                f.write_str(" OR ")?;
                write_child(f, r, 2)
            }
            Expr::And(l, r) => {
                write_child(f, l, 2)?;
                f.write_str(" AND ")?;
                write_child(f, r, 3)
            }
            Expr::Not(e) => {
                f.write_str("NOT ")?;
                write_child(f, e, 3)
            }
            Expr::FieldEquals { field, value } => write!(f, "{}:{}", field, value),
            Expr::FieldRange { field, range } => write!(f, "{}:{}", field, range),
            Expr::FieldQuoted { field, text } => write!(f, "{}:\"{}\"", field, text),
            Expr::FieldCompare { field, op, value } => write!(f, "{}:{}{}", field, op, value),
        }
    }
}
