//! Error types for the `docqa` crate.

use thiserror::Error;

/// Errors that can occur while loading or querying a document.
#[derive(Debug, Error)]
pub enum DocQaError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The document could not be turned into text.
    ///
    /// A malformed document fails the whole load; no corpus is built.
    #[error("Extraction error ({source_name}): {message}")]
    ExtractionError {
        /// Display name of the document that failed.
        source_name: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error in the load/query orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),

    /// An I/O error while reading a document.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A convenience result type for document QA operations.
pub type Result<T> = std::result::Result<T, DocQaError>;
