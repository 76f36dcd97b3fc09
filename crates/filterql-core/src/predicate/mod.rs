//! Backend-neutral predicate tree
//!
//! The translator's output. A host either walks the tree itself (to build a
//! SQL `WHERE`, an index scan, ...) or implements [`PredicateConsumer`] and
//! lets [`Predicate::evaluate`] fold the connectives.

mod consumer;
mod record;

pub use consumer::PredicateConsumer;
pub use record::Record;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::MatchStyle;
use crate::value::{CompareOp, Range, Value};

/// A quoted text pattern and the match policy the schema chose for its field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    pub text: String,
    pub style: MatchStyle,
}

impl Pattern {
    pub fn new(text: impl Into<String>, style: MatchStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Apply the match style to a candidate value
    pub fn is_match(&self, candidate: &str) -> bool {
        match self.style {
            MatchStyle::Exact => candidate == self.text,
            MatchStyle::Contains => candidate.contains(self.text.as_str()),
            MatchStyle::ContainsIgnoreCase => candidate
                .to_lowercase()
                .contains(&self.text.to_lowercase()),
            MatchStyle::Prefix => candidate.starts_with(self.text.as_str()),
            MatchStyle::PrefixIgnoreCase => candidate
                .to_lowercase()
                .starts_with(&self.text.to_lowercase()),
            MatchStyle::Suffix => candidate.ends_with(self.text.as_str()),
            MatchStyle::SuffixIgnoreCase => candidate
                .to_lowercase()
                .ends_with(&self.text.to_lowercase()),
        }
    }
}

/// Compiled filter expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Equals(String, Value),
    InRange(String, Range),
    Matches(String, Pattern),
    Compare(String, CompareOp, Value),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    /// `Always(true)` matches everything, `Always(false)` nothing
    Always(bool),
}

impl Predicate {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Equals(field.into(), value.into())
    }

    pub fn in_range(field: impl Into<String>, range: Range) -> Self {
        Predicate::InRange(field.into(), range)
    }

    pub fn matches(field: impl Into<String>, pattern: Pattern) -> Self {
        Predicate::Matches(field.into(), pattern)
    }

    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Predicate::Compare(field.into(), op, value.into())
    }

    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::Always(true))
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Predicate::Always(false))
    }

    /// Evaluate against a host consumer, short-circuiting `And` / `Or`.
    pub fn evaluate<C: PredicateConsumer + ?Sized>(&self, consumer: &C) -> bool {
        match self {
            Predicate::Equals(field, value) => consumer.equals(field, value),
            Predicate::InRange(field, range) => consumer.in_range(field, range),
            Predicate::Matches(field, pattern) => consumer.matches(field, pattern),
            Predicate::Compare(field, op, value) => consumer.compare(field, *op, value),
            Predicate::And(l, r) => l.evaluate(consumer) && r.evaluate(consumer),
            Predicate::Or(l, r) => l.evaluate(consumer) || r.evaluate(consumer),
            Predicate::Not(inner) => !inner.evaluate(consumer),
            Predicate::Always(b) => *b,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals(field, value) => write!(f, "{} = {}", field, value),
            Predicate::InRange(field, range) => write!(f, "{} in {}", field, range),
            Predicate::Matches(field, pattern) => {
                write!(f, "{} ~{} \"{}\"", field, pattern.style, pattern.text)
            }
            Predicate::Compare(field, op, value) => write!(f, "{} {} {}", field, op, value),
            Predicate::And(l, r) => write!(f, "({} and {})", l, r),
            Predicate::Or(l, r) => write!(f, "({} or {})", l, r),
            Predicate::Not(inner) => write!(f, "not {}", inner),
            Predicate::Always(b) => write!(f, "{}", b),
        }
    }
}
