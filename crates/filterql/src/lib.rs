//! filterql
//!
//! Host-side glue around [`filterql_core`]: JSON configuration for the
//! field schema and compile limits, logging setup, and a [`QueryEngine`]
//! that compiles a query and filters in-memory candidates with it.

pub mod config;
pub mod engine;
pub mod error;
pub mod tracing;

// Re-export main types at crate root
pub use config::FilterConfig;
pub use engine::QueryEngine;
pub use error::{Error, Result};

pub use filterql_core::{
    compile, CompileError, CompileOptions, FieldSchema, FieldSpec, MatchStyle, Predicate,
    PredicateConsumer, Record, Value, ValueKind,
};
