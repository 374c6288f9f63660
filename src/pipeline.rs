//! Chat pipeline orchestrator.
//!
//! [`ChatPipeline`] wires the full per-question workflow: rewrite → hybrid
//! retrieve → assemble → generate. Construct one via
//! [`ChatPipeline::builder()`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rag_chat::{ChatPipeline, RetrievalConfig};
//!
//! let pipeline = ChatPipeline::builder()
//!     .config(RetrievalConfig::default())
//!     .embedder(Arc::new(embeddings))
//!     .index(Arc::new(index))
//!     .completer(Arc::new(completer))
//!     .build()?;
//!
//! let answer = pipeline.ask("Өвлийн хүрэм байгаа юу?").await?;
//! ```

use std::sync::Arc;

use tracing::{info, warn};

use crate::answer::AnswerGenerator;
use crate::completion::ChatCompleter;
use crate::config::RetrievalConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::retrieve::HybridRetriever;
use crate::rewrite::QueryRewriter;
use crate::vectorstore::VectorIndex;

/// The per-question orchestrator.
///
/// Each call to [`ask`](ChatPipeline::ask) is stateless: no dependency on
/// prior turns, no shared mutable state. The handle is cheaply shareable
/// across concurrent requests.
pub struct ChatPipeline {
    config: RetrievalConfig,
    retriever: HybridRetriever,
    generator: AnswerGenerator,
}

impl ChatPipeline {
    /// Create a new [`ChatPipelineBuilder`].
    pub fn builder() -> ChatPipelineBuilder {
        ChatPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Answer `question` from the indexed knowledge base.
    ///
    /// Retrieval failure is not surfaced to the user: the pipeline degrades
    /// to an empty context, and the generator then produces the fixed
    /// refusal phrase. Generation failure propagates — see
    /// [`AnswerGenerator::generate`].
    pub async fn ask(&self, question: &str) -> Result<String> {
        let context = match self.retriever.retrieve(question, self.config.top_k).await {
            Ok(context) => context,
            Err(e) => {
                warn!(error = %e, "retrieval failed, answering with empty context");
                String::new()
            }
        };

        info!(question, context_len = context.len(), "answering question");
        self.generator.generate(question, &context).await
    }
}

/// Builder for constructing a [`ChatPipeline`].
///
/// All fields are required. The builder wires the rewriter, retriever, and
/// generator from the injected capability handles.
#[derive(Default)]
pub struct ChatPipelineBuilder {
    config: Option<RetrievalConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    index: Option<Arc<dyn VectorIndex>>,
    completer: Option<Arc<dyn ChatCompleter>>,
}

impl ChatPipelineBuilder {
    /// Set the retrieval configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the chat completer used for both rewriting and answering.
    pub fn completer(mut self, completer: Arc<dyn ChatCompleter>) -> Self {
        self.completer = Some(completer);
        self
    }

    /// Build the [`ChatPipeline`], validating that all fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<ChatPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedder =
            self.embedder.ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let index = self.index.ok_or_else(|| RagError::Config("index is required".to_string()))?;
        let completer =
            self.completer.ok_or_else(|| RagError::Config("completer is required".to_string()))?;

        let rewriter = QueryRewriter::new(completer.clone());
        let retriever = HybridRetriever::new(embedder, index, rewriter);
        let generator = AnswerGenerator::new(completer);

        Ok(ChatPipeline { config, retriever, generator })
    }
}
