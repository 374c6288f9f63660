//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap a specific embedding backend behind a unified async
/// interface so the concrete provider is swappable (and fakeable in tests).
/// The default [`embed`](EmbeddingProvider::embed) implementation delegates
/// to a one-element [`embed_batch`](EmbeddingProvider::embed_batch) call.
///
/// # Example
///
/// ```rust,ignore
/// use rag_chat::EmbeddingProvider;
///
/// let embedding = provider.embed("boys winter jacket size 140").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The output preserves the input's order and length.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| crate::error::RagError::Embedding {
            provider: "unknown".into(),
            message: "backend returned no embedding for a single input".into(),
        })
    }

    /// Return the dimensionality of embeddings produced by this provider.
    ///
    /// Must match the vector index's configured dimension.
    fn dimensions(&self) -> usize;
}
