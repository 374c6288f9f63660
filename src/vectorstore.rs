//! Vector index trait for storing and searching embeddings.

use async_trait::async_trait;

use crate::document::{RetrievalMatch, VectorRecord};
use crate::error::Result;

/// A vector index with upsert and nearest-neighbor query.
///
/// The index itself is an external collaborator; this trait is the narrow
/// capability surface the pipeline consumes. Implementations are stateless
/// after construction and shareable across concurrent requests.
///
/// # Example
///
/// ```rust,ignore
/// use rag_chat::{VectorIndex, InMemoryIndex};
///
/// let index = InMemoryIndex::new();
/// index.upsert(&records).await?;
/// let matches = index.query(&query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Upsert a batch of vector records.
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;

    /// Return the `top_k` nearest matches to `embedding`, with metadata,
    /// ordered by descending similarity.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievalMatch>>;
}
