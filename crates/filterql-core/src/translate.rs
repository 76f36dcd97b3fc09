//! AST → predicate translation
//!
//! Checks every leaf against the host schema: the field must exist, the
//! value kind must equal the declared kind (no coercion), and the comparison
//! must be one the field's style allows.

use thiserror::Error;

use crate::parser::Expr;
use crate::predicate::{Pattern, Predicate};
use crate::schema::{ComparisonStyle, FieldSchema, FieldSpec};
use crate::value::{Value, ValueKind};

/// Comparison forms, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Range,
    Pattern,
    Ordering,
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Range => write!(f, "range"),
            Comparison::Pattern => write!(f, "quoted pattern"),
            Comparison::Ordering => write!(f, "ordering comparison"),
        }
    }
}

/// Why a field was rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationReason {
    #[error("unknown field")]
    UnknownField,

    #[error("expected a {expected} value, found {found}")]
    KindMismatch { expected: ValueKind, found: ValueKind },

    #[error("{comparison} is not supported by {style} fields")]
    UnsupportedComparison {
        style: ComparisonStyle,
        comparison: Comparison,
    },
}

/// A field rejected by the schema
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid field '{field}': {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    fn new(field: &str, reason: ValidationReason) -> Self {
        Self {
            field: field.to_string(),
            reason,
        }
    }
}

fn lookup<'s>(schema: &'s FieldSchema, field: &str) -> Result<&'s FieldSpec, ValidationError> {
    schema
        .get(field)
        .ok_or_else(|| ValidationError::new(field, ValidationReason::UnknownField))
}

fn check_kind(field: &str, spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    if value.kind() == spec.kind {
        return Ok(());
    }
    Err(ValidationError::new(
        field,
        ValidationReason::KindMismatch {
            expected: spec.kind,
            found: value.kind(),
        },
    ))
}

fn require_range(field: &str, spec: &FieldSpec, comparison: Comparison) -> Result<(), ValidationError> {
    if spec.supports_range() {
        return Ok(());
    }
    Err(ValidationError::new(
        field,
        ValidationReason::UnsupportedComparison {
            style: spec.style,
            comparison,
        },
    ))
}

/// Translate a parsed expression into a predicate.
///
/// Children are translated left to right before being combined; the first
/// rejected leaf aborts the whole translation.
pub fn translate(expr: Expr<'_>, schema: &FieldSchema) -> Result<Predicate, ValidationError> {
    match expr {
        Expr::Or(l, r) => {
            let left = translate(*l, schema)?;
            let right = translate(*r, schema)?;
            Ok(Predicate::or(left, right))
        }
        Expr::And(l, r) => {
            let left = translate(*l, schema)?;
            let right = translate(*r, schema)?;
            Ok(Predicate::and(left, right))
        }
        Expr::Not(inner) => Ok(Predicate::not(translate(*inner, schema)?)),
        Expr::FieldEquals { field, value } => {
            let spec = lookup(schema, field)?;
            check_kind(field, spec, &value)?;
            Ok(Predicate::Equals(field.to_string(), value))
        }
        Expr::FieldRange { field, range } => {
            let spec = lookup(schema, field)?;
            require_range(field, spec, Comparison::Range)?;
            check_kind(field, spec, &range.lower)?;
            check_kind(field, spec, &range.upper)?;
            Ok(Predicate::InRange(field.to_string(), range))
        }
        Expr::FieldQuoted { field, text } => {
            let spec = lookup(schema, field)?;
            let Some(style) = spec.match_style() else {
                return Err(ValidationError::new(
                    field,
                    ValidationReason::UnsupportedComparison {
                        style: spec.style,
                        comparison: Comparison::Pattern,
                    },
                ));
            };
            if spec.kind != ValueKind::Text {
                return Err(ValidationError::new(
                    field,
                    ValidationReason::KindMismatch {
                        expected: spec.kind,
                        found: ValueKind::Text,
                    },
                ));
            }
            Ok(Predicate::Matches(field.to_string(), Pattern::new(text, style)))
        }
        Expr::FieldCompare { field, op, value } => {
            let spec = lookup(schema, field)?;
            require_range(field, spec, Comparison::Ordering)?;
            check_kind(field, spec, &value)?;
            Ok(Predicate::Compare(field.to_string(), op, value))
        }
    }
}
