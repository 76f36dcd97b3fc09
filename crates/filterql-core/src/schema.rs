//! Field schema supplied by the host
//!
//! The schema names every field a query may reference, the kind of value it
//! holds, and how it may be compared. It is plain data: hosts build it in
//! code or deserialize it from configuration.
//!
//! ```rust
//! use filterql_core::schema::{FieldSchema, FieldSpec, MatchStyle};
//! use filterql_core::ValueKind;
//!
//! let schema = FieldSchema::new()
//!     .with("title", FieldSpec::text(MatchStyle::ContainsIgnoreCase))
//!     .with("price", FieldSpec::range(ValueKind::Number))
//!     .with("active", FieldSpec::equality(ValueKind::Boolean));
//! assert!(schema.get("price").is_some());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::value::ValueKind;

/// How a quoted pattern is matched against a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStyle {
    /// Whole value equals the pattern
    Exact,
    /// Pattern occurs anywhere in the value
    Contains,
    /// Like `Contains`, ignoring case
    #[default]
    ContainsIgnoreCase,
    /// Value starts with the pattern
    Prefix,
    /// Like `Prefix`, ignoring case
    PrefixIgnoreCase,
    /// Value ends with the pattern
    Suffix,
    /// Like `Suffix`, ignoring case
    SuffixIgnoreCase,
}

impl fmt::Display for MatchStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStyle::Exact => write!(f, "exact"),
            MatchStyle::Contains => write!(f, "contains"),
            MatchStyle::ContainsIgnoreCase => write!(f, "contains_ignore_case"),
            MatchStyle::Prefix => write!(f, "prefix"),
            MatchStyle::PrefixIgnoreCase => write!(f, "prefix_ignore_case"),
            MatchStyle::Suffix => write!(f, "suffix"),
            MatchStyle::SuffixIgnoreCase => write!(f, "suffix_ignore_case"),
        }
    }
}

/// Comparisons a field supports beyond plain equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonStyle {
    /// `field:value` only
    Equality,
    /// Also `field:a..b` and `field:>v` style comparisons
    Range,
    /// Also `field:"pattern"`, matched with the given style
    TextPattern(MatchStyle),
}

impl fmt::Display for ComparisonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonStyle::Equality => write!(f, "equality"),
            ComparisonStyle::Range => write!(f, "range"),
            ComparisonStyle::TextPattern(_) => write!(f, "text pattern"),
        }
    }
}

/// Declared kind and comparison style of one field.
///
/// Serialized as `{ "kind": "text", "style": "text_pattern", "match": "prefix" }`;
/// `match` is only accepted for `text_pattern` and defaults to
/// `contains_ignore_case`. `text_pattern` requires kind `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFieldSpec", into = "RawFieldSpec")]
pub struct FieldSpec {
    pub kind: ValueKind,
    pub style: ComparisonStyle,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StyleName {
    Equality,
    Range,
    TextPattern,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFieldSpec {
    kind: ValueKind,
    style: StyleName,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    match_style: Option<MatchStyle>,
}

impl TryFrom<RawFieldSpec> for FieldSpec {
    type Error = String;

    fn try_from(raw: RawFieldSpec) -> Result<Self, Self::Error> {
        if matches!(raw.style, StyleName::TextPattern) && raw.kind != ValueKind::Text {
            return Err(format!(
                "style 'text_pattern' requires kind 'text', found '{}'",
                raw.kind
            ));
        }
        let style = match (raw.style, raw.match_style) {
            (StyleName::TextPattern, style) => {
                ComparisonStyle::TextPattern(style.unwrap_or_default())
            }
            (_, Some(style)) => {
                return Err(format!(
                    "match style '{}' requires style 'text_pattern'",
                    style
                ))
            }
            (StyleName::Equality, None) => ComparisonStyle::Equality,
            (StyleName::Range, None) => ComparisonStyle::Range,
        };
        Ok(FieldSpec::new(raw.kind, style))
    }
}

impl From<FieldSpec> for RawFieldSpec {
    fn from(spec: FieldSpec) -> Self {
        let (style, match_style) = match spec.style {
            ComparisonStyle::Equality => (StyleName::Equality, None),
            ComparisonStyle::Range => (StyleName::Range, None),
            ComparisonStyle::TextPattern(m) => (StyleName::TextPattern, Some(m)),
        };
        RawFieldSpec {
            kind: spec.kind,
            style,
            match_style,
        }
    }
}

impl FieldSpec {
    pub fn new(kind: ValueKind, style: ComparisonStyle) -> Self {
        Self { kind, style }
    }

    pub fn equality(kind: ValueKind) -> Self {
        Self::new(kind, ComparisonStyle::Equality)
    }

    pub fn range(kind: ValueKind) -> Self {
        Self::new(kind, ComparisonStyle::Range)
    }

    /// Text field accepting quoted patterns
    pub fn text(style: MatchStyle) -> Self {
        Self::new(ValueKind::Text, ComparisonStyle::TextPattern(style))
    }

    pub fn supports_range(&self) -> bool {
        self.style == ComparisonStyle::Range
    }

    /// Match style if the field accepts quoted patterns
    pub fn match_style(&self) -> Option<MatchStyle> {
        match self.style {
            ComparisonStyle::TextPattern(style) => Some(style),
            _ => None,
        }
    }
}

/// Mapping from field name to its spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: BTreeMap<String, FieldSpec>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: FieldSpec) -> Option<FieldSpec> {
        self.fields.insert(name.into(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldSpec)> for FieldSchema {
    fn from_iter<I: IntoIterator<Item = (K, FieldSpec)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let schema = FieldSchema::new()
            .with("title", FieldSpec::text(MatchStyle::Exact))
            .with("price", FieldSpec::range(ValueKind::Number));
        assert_eq!(schema.len(), 2);
        assert!(schema.contains("title"));
        assert!(!schema.contains("ghost"));
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["price", "title"]);
        assert!(schema.get("price").unwrap().supports_range());
        assert_eq!(
            schema.get("title").unwrap().match_style(),
            Some(MatchStyle::Exact)
        );
    }

    #[test]
    fn test_from_json() {
        let schema = FieldSchema::from_json(
            r#"{
                "status": { "kind": "text", "style": "equality" },
                "price": { "kind": "number", "style": "range" },
                "title": { "kind": "text", "style": "text_pattern", "match": "prefix" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            schema.get("status"),
            Some(&FieldSpec::equality(ValueKind::Text))
        );
        assert_eq!(
            schema.get("price"),
            Some(&FieldSpec::range(ValueKind::Number))
        );
        assert_eq!(
            schema.get("title"),
            Some(&FieldSpec::text(MatchStyle::Prefix))
        );
    }

    #[test]
    fn test_json_match_defaults_and_restrictions() {
        let schema = FieldSchema::from_json(
            r#"{ "name": { "kind": "text", "style": "text_pattern" } }"#,
        )
        .unwrap();
        assert_eq!(
            schema.get("name").unwrap().match_style(),
            Some(MatchStyle::ContainsIgnoreCase)
        );

        let err = FieldSchema::from_json(
            r#"{ "sku": { "kind": "text", "style": "equality", "match": "exact" } }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let schema = FieldSchema::new()
            .with("title", FieldSpec::text(MatchStyle::Contains))
            .with("active", FieldSpec::equality(ValueKind::Boolean));
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(FieldSchema::from_json(&json).unwrap(), schema);
    }

    #[test]
    fn test_json_match_style_names() {
        let schema = FieldSchema::from_json(
            r#"{
                "sku": { "kind": "text", "style": "text_pattern", "match": "prefix_ignore_case" },
                "ext": { "kind": "text", "style": "text_pattern", "match": "suffix" },
                "host": { "kind": "text", "style": "text_pattern", "match": "suffix_ignore_case" }
            }"#,
        )
        .unwrap();
        assert_eq!(
            schema.get("sku").unwrap().match_style(),
            Some(MatchStyle::PrefixIgnoreCase)
        );
        assert_eq!(
            schema.get("ext").unwrap().match_style(),
            Some(MatchStyle::Suffix)
        );
        assert_eq!(
            schema.get("host").unwrap().match_style(),
            Some(MatchStyle::SuffixIgnoreCase)
        );
        assert_eq!(MatchStyle::PrefixIgnoreCase.to_string(), "prefix_ignore_case");
    }

    #[test]
    fn test_json_rejects_pattern_on_non_text_kind() {
        let err = FieldSchema::from_json(
            r#"{ "price": { "kind": "number", "style": "text_pattern" } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("requires kind 'text'"));
    }

    #[test]
    fn test_json_rejects_unknown_kind() {
        let err = FieldSchema::from_json(r#"{ "x": { "kind": "date", "style": "range" } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_from_iterator() {
        let schema: FieldSchema = [("a", FieldSpec::equality(ValueKind::Number))]
            .into_iter()
            .collect();
        assert_eq!(schema.len(), 1);
    }
}
