//! Filter configuration loading.
//!
//! A host keeps its searchable fields and compile limits in one JSON
//! document:
//!
//! ```json
//! {
//!   "options": { "max_query_len": 500, "max_depth": 128 },
//!   "fields": {
//!     "status": { "kind": "text", "style": "equality" },
//!     "price":  { "kind": "number", "style": "range" },
//!     "title":  { "kind": "text", "style": "text_pattern", "match": "contains_ignore_case" }
//!   }
//! }
//! ```
//!
//! `options` and any of its keys may be omitted.

use std::fs;
use std::path::Path;

use filterql_core::{CompileOptions, FieldSchema};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Compile limits plus the field schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub options: CompileOptions,
    pub fields: FieldSchema,
}

impl FilterConfig {
    pub fn new(fields: FieldSchema) -> Self {
        Self {
            options: CompileOptions::default(),
            fields,
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FilterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading filter config");
        Self::from_json(&json)
    }

    /// Reject limits that would refuse every query
    pub fn validate(&self) -> Result<()> {
        if self.options.max_query_len == 0 {
            return Err(Error::Config("max_query_len must be positive".to_string()));
        }
        if self.options.max_depth == 0 {
            return Err(Error::Config("max_depth must be positive".to_string()));
        }
        if self.fields.is_empty() {
            tracing::warn!("filter config declares no fields; every field query will be rejected");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filterql_core::{FieldSpec, MatchStyle, ValueKind};

    #[test]
    fn test_options_default_when_missing() {
        let config = FilterConfig::from_json(
            r#"{ "fields": { "price": { "kind": "number", "style": "range" } } }"#,
        )
        .unwrap();
        assert_eq!(config.options, CompileOptions::default());
        assert_eq!(
            config.fields.get("price"),
            Some(&FieldSpec::range(ValueKind::Number))
        );
    }

    #[test]
    fn test_full_document() {
        let config = FilterConfig::from_json(
            r#"{
                "options": { "max_query_len": 120 },
                "fields": {
                    "title": { "kind": "text", "style": "text_pattern", "match": "exact" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.options.max_query_len, 120);
        assert_eq!(config.options.max_depth, CompileOptions::default().max_depth);
        assert_eq!(
            config.fields.get("title"),
            Some(&FieldSpec::text(MatchStyle::Exact))
        );
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = FilterConfig::from_json(r#"{ "options": { "max_depth": 0 }, "fields": {} }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = FilterConfig::from_json(r#"{ "fields": "#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = FilterConfig::from_json(r#"{ "fields": {}, "extra": 1 }"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
