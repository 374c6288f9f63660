//! Configuration for the chat pipeline and ingestion jobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// The default index name when `INDEX_NAME` is not set.
pub const DEFAULT_INDEX_NAME: &str = "rag-chat-demo";

/// Environment-sourced credentials and index selection.
///
/// Missing required keys are a fatal startup error; binaries call
/// [`AppConfig::from_env`] before doing any work.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the embedding and generative model service.
    pub embedding_api_key: String,
    /// API key for the vector index service.
    pub index_api_key: String,
    /// Optional host override for the vector index data plane.
    pub index_host: Option<String>,
    /// The name of the vector index.
    pub index_name: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Recognized variables: `EMBEDDING_API_KEY` (required),
    /// `INDEX_SERVICE_API_KEY` (required), `INDEX_HOST` (optional),
    /// `INDEX_NAME` (defaults to `"rag-chat-demo"`).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] when a required variable is missing or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            embedding_api_key: require_env("EMBEDDING_API_KEY")?,
            index_api_key: require_env("INDEX_SERVICE_API_KEY")?,
            index_host: optional_env("INDEX_HOST"),
            index_name: optional_env("INDEX_NAME")
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    optional_env(name).ok_or_else(|| RagError::Config(format!("{name} missing")))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Tunable parameters for chunking and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of nearest matches requested per retrieval sub-query.
    pub top_k: usize,
    /// Bounded timeout applied to each external call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { chunk_size: 900, chunk_overlap: 150, top_k: 5, request_timeout_secs: 30 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }

    /// The per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of nearest matches requested per retrieval sub-query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the bounded timeout applied to each external call.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidChunking`] if `chunk_overlap >= chunk_size`
    /// or `chunk_size == 0`, and [`RagError::Config`] if `top_k == 0`.
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::InvalidChunking("chunk_size must be greater than zero".into()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::InvalidChunking(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
