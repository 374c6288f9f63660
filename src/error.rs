//! Error types for the `rag-chat` crate.

use thiserror::Error;

/// Errors that can occur in the retrieval-augmentation pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// Missing or invalid credentials, index name, or other startup configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chunking parameters are inconsistent (e.g. overlap >= chunk size).
    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),

    /// The embedding service failed to produce vectors.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector index similarity query failed.
    #[error("Index query error ({backend}): {message}")]
    IndexQuery {
        /// The vector index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector index upsert failed.
    #[error("Index upsert error ({backend}): {message}")]
    IndexUpsert {
        /// The vector index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The generative model failed to produce a completion.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generative model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An external call exceeded its bounded timeout.
    #[error("Timeout during {operation}")]
    Timeout {
        /// The operation that timed out (e.g. "embedding request").
        operation: String,
    },

    /// An ingestion source could not be read.
    #[error("Source error ({path}): {message}")]
    Source {
        /// The path of the source file.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for retrieval-augmentation operations.
pub type Result<T> = std::result::Result<T, RagError>;
