//! Batch ingestion: chunk → embed → upsert with an accumulate-then-flush buffer.
//!
//! Each chunk gets a fresh UUID, so re-running ingestion creates duplicate
//! vectors with new ids — a documented limitation; deduplication requires
//! reindexing, which is out of scope.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::chunking::FixedSizeChunker;
use crate::document::{PassageMetadata, SourceRecord, VectorRecord};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorIndex;

/// Ingests source records into a vector index in embedding batches.
///
/// Chunk texts and their metadata accumulate until `batch_size` is reached,
/// then the batch is embedded in one call and upserted; the partial final
/// batch is always flushed. Not intended to run concurrently against the
/// same index.
///
/// # Example
///
/// ```rust,ignore
/// use rag_chat::{Ingestor, FixedSizeChunker};
///
/// let ingestor = Ingestor::new(embedder, index, FixedSizeChunker::new(900, 150)?, 64);
/// let count = ingestor.ingest(&records).await?;
/// ```
pub struct Ingestor {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    chunker: FixedSizeChunker,
    batch_size: usize,
}

impl Ingestor {
    /// Create a new ingestor.
    ///
    /// `batch_size` bounds how many chunk texts are embedded per service
    /// call; values below 1 are clamped to 1.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        chunker: FixedSizeChunker,
        batch_size: usize,
    ) -> Self {
        Self { embedder, index, chunker, batch_size: batch_size.max(1) }
    }

    /// Chunk, embed, and upsert all `records`.
    ///
    /// Returns the number of vectors upserted.
    ///
    /// # Errors
    ///
    /// Propagates the first embedding or upsert failure; vectors already
    /// flushed stay in the index.
    pub async fn ingest(&self, records: &[SourceRecord]) -> Result<usize> {
        let mut pending: Vec<PassageMetadata> = Vec::new();
        let mut total = 0;

        for record in records {
            for chunk_text in self.chunker.chunk(&record.text) {
                pending.push(PassageMetadata::for_chunk(record, chunk_text));
                if pending.len() >= self.batch_size {
                    total += self.flush(&mut pending).await?;
                }
            }
        }

        // Flush the partial final batch.
        if !pending.is_empty() {
            total += self.flush(&mut pending).await?;
        }

        info!(record_count = records.len(), vector_count = total, "ingestion completed");
        Ok(total)
    }

    /// Embed and upsert the pending batch, clearing the buffer.
    async fn flush(&self, pending: &mut Vec<PassageMetadata>) -> Result<usize> {
        let texts: Vec<&str> = pending.iter().map(|m| m.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let vectors: Vec<VectorRecord> = pending
            .drain(..)
            .zip(embeddings)
            .map(|(metadata, values)| VectorRecord {
                id: Uuid::new_v4().to_string(),
                values,
                metadata,
            })
            .collect();

        self.index.upsert(&vectors).await?;
        Ok(vectors.len())
    }
}
