//! filterql core
//!
//! Compiles GitHub-style filter queries such as
//! `title:phone AND price:10..50 OR NOT tag:"clearance"` into a
//! backend-neutral [`Predicate`] tree.
//!
//! The pipeline is pure and synchronous: text → tokens ([`parser::Lexer`]) →
//! AST ([`parser::Expr`]) → predicate ([`translate()`]). Nothing keeps state
//! between calls, so any stage may run concurrently from any thread.
//!
//! # Example
//!
//! ```rust
//! use filterql_core::{compile, FieldSchema, FieldSpec, MatchStyle, Predicate, Record, ValueKind};
//!
//! let schema = FieldSchema::new()
//!     .with("title", FieldSpec::text(MatchStyle::ContainsIgnoreCase))
//!     .with("price", FieldSpec::range(ValueKind::Number));
//!
//! let filter = compile("title:\"phone\" AND price:10..50", &schema).unwrap();
//!
//! let record = Record::new().with("title", "Red Phone").with("price", 25);
//! assert!(filter.evaluate(&record));
//! assert_eq!(compile("", &schema).unwrap(), Predicate::Always(true));
//! ```

pub mod compile;
pub mod parser;
pub mod predicate;
pub mod schema;
pub mod translate;
pub mod value;

// Re-export main types at crate root
pub use compile::{compile, CompileError, CompileOptions, Compiler};
pub use parser::{parse, tokenize, Expr, Lexer, ParseError, Parser, Token, TokenKind};
pub use predicate::{Pattern, Predicate, PredicateConsumer, Record};
pub use schema::{ComparisonStyle, FieldSchema, FieldSpec, MatchStyle};
pub use translate::{translate, ValidationError, ValidationReason};
pub use value::{CompareOp, Range, Value, ValueKind};
