//! Host capability interface for executing predicates

use super::Pattern;
use crate::value::{CompareOp, Range, Value};

/// Field-level checks a host answers for one candidate (row, document, ...).
///
/// The compiler only defines the predicate shape; how each leaf is answered
/// is up to the host. [`super::Predicate::evaluate`] combines the answers.
pub trait PredicateConsumer {
    /// `field` equals `value`
    fn equals(&self, field: &str, value: &Value) -> bool;

    /// `field` lies within `range`.
    ///
    /// Bounds arrive as written, so `lower` may exceed `upper`.
    fn in_range(&self, field: &str, range: &Range) -> bool;

    /// `field` matches a quoted pattern under its match style
    fn matches(&self, field: &str, pattern: &Pattern) -> bool;

    /// `field <op> value`, with `field` on the left
    fn compare(&self, field: &str, op: CompareOp, value: &Value) -> bool;
}

impl<T: PredicateConsumer + ?Sized> PredicateConsumer for &T {
    fn equals(&self, field: &str, value: &Value) -> bool {
        (**self).equals(field, value)
    }

    fn in_range(&self, field: &str, range: &Range) -> bool {
        (**self).in_range(field, range)
    }

    fn matches(&self, field: &str, pattern: &Pattern) -> bool {
        (**self).matches(field, pattern)
    }

    fn compare(&self, field: &str, op: CompareOp, value: &Value) -> bool {
        (**self).compare(field, op, value)
    }
}
