//! Common error types for filterql hosts.

use thiserror::Error;

/// Common error type for filterql host operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Query compile error
    #[error("query error: {0}")]
    Compile(#[from] filterql_core::CompileError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using filterql Error.
pub type Result<T> = std::result::Result<T, Error>;
