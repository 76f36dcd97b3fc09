//! Query text → predicate, end to end

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::parser::{tokenize, ParseError, Parser, DEFAULT_MAX_DEPTH};
use crate::predicate::Predicate;
use crate::schema::FieldSchema;
use crate::translate::{translate, ValidationError};

/// Default upper bound on query length, in bytes
pub const DEFAULT_MAX_QUERY_LEN: usize = 500;

/// Errors from a single compile call
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    /// Input the lexer could not classify
    #[error("unrecognized input '{lexeme}' at position {offset}")]
    Lex { lexeme: String, offset: usize },

    #[error("syntax error: {0}")]
    Syntax(ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("query is {length} bytes long, limit is {limit}")]
    TooLong { length: usize, limit: usize },
}

impl CompileError {
    /// Byte offset into the query, for lexical and syntax errors
    pub fn offset(&self) -> Option<usize> {
        match self {
            CompileError::Lex { offset, .. } => Some(*offset),
            CompileError::Syntax(err) => Some(err.offset()),
            CompileError::Validation(_) | CompileError::TooLong { .. } => None,
        }
    }

    /// Offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            CompileError::Validation(err) => Some(&err.field),
            _ => None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnknownToken { lexeme, offset } => CompileError::Lex { lexeme, offset },
            other => CompileError::Syntax(other),
        }
    }
}

/// Limits applied to every compile call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Longest accepted query, in bytes
    pub max_query_len: usize,
    /// Deepest accepted nesting of parentheses, and tallest accepted
    /// `AND`/`OR`/`NOT` tree; capped at [`MAX_DEPTH_LIMIT`](crate::parser::MAX_DEPTH_LIMIT)
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_query_len: DEFAULT_MAX_QUERY_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Reusable compiler holding its options.
///
/// Stateless between calls; share it freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `query` against `schema`.
    ///
    /// Blank queries match everything and never consult the schema.
    pub fn compile(&self, query: &str, schema: &FieldSchema) -> Result<Predicate, CompileError> {
        if query.trim().is_empty() {
            trace!("blank query compiles to match-all");
            return Ok(Predicate::Always(true));
        }

        if query.len() > self.options.max_query_len {
            debug!(
                length = query.len(),
                limit = self.options.max_query_len,
                "query rejected: too long"
            );
            return Err(CompileError::TooLong {
                length: query.len(),
                limit: self.options.max_query_len,
            });
        }

        debug!(query, "compiling filter query");

        let tokens = tokenize(query);
        trace!(tokens = tokens.len(), "tokenized");

        let expr = Parser::new(tokens)
            .with_max_depth(self.options.max_depth)
            .run()
            .map_err(|err| {
                debug!(offset = err.offset(), error = %err, "query rejected: syntax");
                CompileError::from(err)
            })?;
        trace!(leaves = expr.leaf_count(), "parsed");

        translate(expr, schema).map_err(|err| {
            debug!(field = %err.field, error = %err, "query rejected: validation");
            CompileError::from(err)
        })
    }
}

/// Compile with default options
pub fn compile(query: &str, schema: &FieldSchema) -> Result<Predicate, CompileError> {
    Compiler::default().compile(query, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MAX_DEPTH_LIMIT;
    use crate::schema::{FieldSpec, MatchStyle};
    use crate::value::{Range, Value, ValueKind};
    use pretty_assertions::assert_eq;

    fn schema() -> FieldSchema {
        FieldSchema::new()
            .with("a", FieldSpec::range(ValueKind::Number))
            .with("b", FieldSpec::range(ValueKind::Number))
            .with("price", FieldSpec::range(ValueKind::Number))
            .with("title", FieldSpec::text(MatchStyle::Contains))
    }

    fn eq(field: &str, n: i64) -> Predicate {
        Predicate::equals(field, n)
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert_eq!(compile("", &FieldSchema::new()).unwrap(), Predicate::Always(true));
        assert_eq!(compile("  \t", &FieldSchema::new()).unwrap(), Predicate::Always(true));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            compile("a:1 OR a:2 AND a:3", &schema()).unwrap(),
            Predicate::or(eq("a", 1), Predicate::and(eq("a", 2), eq("a", 3)))
        );
    }

    #[test]
    fn test_not_binds_tightly() {
        assert_eq!(
            compile("NOT a:1 AND b:2", &schema()).unwrap(),
            Predicate::and(Predicate::not(eq("a", 1)), eq("b", 2))
        );
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(
            compile("(a:1 OR a:2) AND b:3", &schema()).unwrap(),
            Predicate::and(Predicate::or(eq("a", 1), eq("a", 2)), eq("b", 3))
        );
    }

    #[test]
    fn test_quoted_keeps_spaces() {
        assert_eq!(
            compile("title:\"red shoes\"", &schema()).unwrap(),
            Predicate::Matches(
                "title".into(),
                crate::predicate::Pattern::new("red shoes", MatchStyle::Contains)
            )
        );
    }

    #[test]
    fn test_range_not_reordered() {
        assert_eq!(
            compile("price:50..10", &schema()).unwrap(),
            Predicate::InRange(
                "price".into(),
                Range {
                    lower: Value::from(50),
                    upper: Value::from(10),
                }
            )
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = compile("ghost:1", &schema()).unwrap_err();
        assert!(matches!(err, CompileError::Validation(_)));
        assert_eq!(err.field(), Some("ghost"));
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn test_syntax_offsets() {
        for (query, offset) in [("a:(1", 2), ("AND a:1", 0), ("a:1 AND", 7)] {
            let err = compile(query, &schema()).unwrap_err();
            assert!(matches!(err, CompileError::Syntax(_)), "{}", query);
            assert_eq!(err.offset(), Some(offset), "{}", query);
        }
    }

    #[test]
    fn test_unknown_token_is_lex_error() {
        let err = compile("a:1 | a:2", &schema()).unwrap_err();
        assert_eq!(
            err,
            CompileError::Lex {
                lexeme: "|".into(),
                offset: 4,
            }
        );
    }

    #[test]
    fn test_length_limit() {
        let compiler = Compiler::new(CompileOptions {
            max_query_len: 8,
            ..CompileOptions::default()
        });
        assert!(compiler.compile("a:1", &schema()).is_ok());
        assert_eq!(
            compiler.compile("a:1 OR a:2", &schema()).unwrap_err(),
            CompileError::TooLong {
                length: 10,
                limit: 8,
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let compiler = Compiler::new(CompileOptions {
            max_depth: 2,
            ..CompileOptions::default()
        });
        assert!(compiler.compile("((a:1))", &schema()).is_ok());
        let err = compiler.compile("(((a:1)))", &schema()).unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn test_long_chain_hits_depth_limit() {
        let compiler = Compiler::new(CompileOptions {
            max_query_len: usize::MAX,
            ..CompileOptions::default()
        });
        let chain = vec!["a:1"; 500].join(" AND ");
        let err = compiler.compile(&chain, &schema()).unwrap_err();
        assert_eq!(
            err,
            CompileError::Syntax(ParseError::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH,
                offset: 8 * DEFAULT_MAX_DEPTH + 4,
            })
        );

        let chain = vec!["a:1"; DEFAULT_MAX_DEPTH + 1].join(" OR ");
        assert!(compiler.compile(&chain, &schema()).is_ok());
    }

    #[test]
    fn test_depth_limit_is_capped() {
        let compiler = Compiler::new(CompileOptions {
            max_query_len: usize::MAX,
            max_depth: usize::MAX,
        });
        let chain = vec!["a:1"; 1000].join(" AND ");
        assert_eq!(
            compiler.compile(&chain, &schema()).unwrap_err(),
            CompileError::Syntax(ParseError::NestingTooDeep {
                limit: MAX_DEPTH_LIMIT,
                offset: 8 * MAX_DEPTH_LIMIT + 4,
            })
        );
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CompileOptions = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
        assert_eq!(
            options,
            CompileOptions {
                max_query_len: DEFAULT_MAX_QUERY_LEN,
                max_depth: 8,
            }
        );
        assert!(serde_json::from_str::<CompileOptions>(r#"{ "depth": 8 }"#).is_err());
    }
}
