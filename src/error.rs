//! Error types for the Sagitta library.
//!
//! All fallible operations in this crate return [`Result`], whose error type is
//! the [`SagittaError`] enum. Backend implementations wrap their native errors
//! in [`SagittaError::Backend`] so that callers (and the instrumentation layer)
//! can observe which provider operation failed without losing the original
//! cause.
//!
//! # Examples
//!
//! ```
//! use sagitta::error::{Result, SagittaError};
//!
//! fn resolve_field(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(SagittaError::schema("field name cannot be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(resolve_field("title").is_ok());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Sagitta operations.
///
/// Programming errors (API misuse, broken invariants) are deliberately *not*
/// represented here: they panic instead of degrading into recoverable errors.
#[derive(Error, Debug)]
pub enum SagittaError {
    /// A backend operation failed. Carries the name of the provider operation
    /// that was executing and the backend's native error as the cause.
    #[error("backend error in '{operation}': {source}")]
    Backend {
        /// Provider operation that failed (e.g. `mutate`, `query`).
        operation: String,
        /// The backend's native error.
        #[source]
        source: anyhow::Error,
    },

    /// Invalid or contradictory configuration (schema registration, field
    /// mapping derivation, mutation construction).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Schema-related errors (unknown stores, missing key information).
    #[error("schema error: {0}")]
    Schema(String),

    /// Query-related errors (parsing, unsupported predicates).
    #[error("query error: {0}")]
    Query(String),

    /// Transaction lifecycle errors (foreign handles, commit after close).
    #[error("transaction error: {0}")]
    Transaction(String),

    /// I/O errors surfaced by storage-backed providers.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors (schema metadata interchange).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with [`SagittaError`].
pub type Result<T> = std::result::Result<T, SagittaError>;

impl SagittaError {
    /// Create a new backend error for the given provider operation.
    pub fn backend<S, E>(operation: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<anyhow::Error>,
    {
        SagittaError::Backend {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// Create a new backend error from a plain message.
    pub fn backend_msg<S: Into<String>, M: Into<String>>(operation: S, msg: M) -> Self {
        SagittaError::Backend {
            operation: operation.into(),
            source: anyhow::anyhow!(msg.into()),
        }
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SagittaError::Configuration(msg.into())
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        SagittaError::Schema(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        SagittaError::Query(msg.into())
    }

    /// Create a new transaction error.
    pub fn transaction<S: Into<String>>(msg: S) -> Self {
        SagittaError::Transaction(msg.into())
    }

    /// The provider operation name carried by a backend error, if any.
    pub fn operation(&self) -> Option<&str> {
        match self {
            SagittaError::Backend { operation, .. } => Some(operation),
            _ => None,
        }
    }
}
