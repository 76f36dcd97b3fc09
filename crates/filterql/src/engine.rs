//! Compile-and-filter convenience for in-memory hosts

use std::sync::Arc;

use filterql_core::{Compiler, FieldSchema, Predicate, PredicateConsumer};

use crate::config::FilterConfig;
use crate::error::Result;

/// Holds a compiler and a schema snapshot.
///
/// The schema sits behind an `Arc`: replacing it never disturbs compiles
/// that already hold the previous snapshot.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    compiler: Compiler,
    schema: Arc<FieldSchema>,
}

impl QueryEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            compiler: Compiler::new(config.options),
            schema: Arc::new(config.fields),
        }
    }

    /// Current schema snapshot
    pub fn schema(&self) -> Arc<FieldSchema> {
        Arc::clone(&self.schema)
    }

    pub fn replace_schema(&mut self, schema: FieldSchema) {
        tracing::debug!(fields = schema.len(), "replacing filter schema");
        self.schema = Arc::new(schema);
    }

    pub fn compile(&self, query: &str) -> Result<Predicate> {
        Ok(self.compiler.compile(query, &self.schema)?)
    }

    /// Compile `query` and keep the candidates it matches, in order
    pub fn filter<'c, C: PredicateConsumer>(
        &self,
        query: &str,
        candidates: &'c [C],
    ) -> Result<Vec<&'c C>> {
        let predicate = self.compile(query)?;
        let matched: Vec<&C> = candidates
            .iter()
            .filter(|c| predicate.evaluate(*c))
            .collect();
        tracing::debug!(
            candidates = candidates.len(),
            matched = matched.len(),
            "filtered candidates"
        );
        Ok(matched)
    }
}

impl From<FilterConfig> for QueryEngine {
    fn from(config: FilterConfig) -> Self {
        Self::new(config)
    }
}
