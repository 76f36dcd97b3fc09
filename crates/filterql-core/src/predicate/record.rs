//! In-memory predicate consumer
//!
//! A field-name → value map that answers predicate leaves directly. Useful
//! for hosts that already hold candidates in memory, and for tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Pattern, PredicateConsumer};
use crate::value::{CompareOp, Range, Value};

/// A single in-memory candidate.
///
/// Missing fields and values of a different kind never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PredicateConsumer for Record {
    fn equals(&self, field: &str, value: &Value) -> bool {
        self.get(field).is_some_and(|actual| actual.same_as(value))
    }

    fn in_range(&self, field: &str, range: &Range) -> bool {
        self.get(field).is_some_and(|actual| range.contains(actual))
    }

    fn matches(&self, field: &str, pattern: &Pattern) -> bool {
        self.get(field)
            .and_then(Value::as_text)
            .is_some_and(|text| pattern.is_match(text))
    }

    fn compare(&self, field: &str, op: CompareOp, value: &Value) -> bool {
        self.get(field)
            .and_then(|actual| actual.partial_cmp_value(value))
            .is_some_and(|ordering| op.accepts(ordering))
    }
}
