//! Hybrid multi-query retrieval.
//!
//! Retrieval fans the question out as two sub-queries — the literal question
//! and its rewritten form — to improve recall against an embedding space
//! that may not capture domain synonyms or cross-lingual phrasing. Matches
//! from both sub-queries are merged in first-seen order and assembled into a
//! deduplicated context block.

use std::sync::Arc;

use tracing::{debug, info};

use crate::context;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::rewrite::QueryRewriter;
use crate::vectorstore::VectorIndex;

/// Issues multiple vector queries per question and merges the results.
///
/// Failure policy is pessimistic: if any sub-query's embed or index call
/// fails, the whole retrieval fails, even when an earlier sub-query already
/// produced matches. The caller converts that into an empty context block
/// (see [`ChatPipeline::ask`](crate::pipeline::ChatPipeline::ask)). This
/// mirrors the original product behavior and is a deliberate choice, at the
/// cost of a transient single-query failure yielding zero context for the
/// turn.
pub struct HybridRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    rewriter: QueryRewriter,
}

impl HybridRetriever {
    /// Create a new retriever from its collaborators.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        rewriter: QueryRewriter,
    ) -> Self {
        Self { embedder, index, rewriter }
    }

    /// Retrieve an assembled context block for `query`.
    ///
    /// Sub-queries run in order: the literal query first, then the rewritten
    /// form. When the rewrite fell back to the identity, the duplicate
    /// sub-query is skipped; assembly already deduplicates, so the
    /// observable result is unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first embed or index-query error encountered
    /// ([`RagError::Embedding`](crate::RagError::Embedding),
    /// [`RagError::IndexQuery`](crate::RagError::IndexQuery), or
    /// [`RagError::Timeout`](crate::RagError::Timeout)).
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<String> {
        let rewritten = self.rewriter.rewrite(query).await;

        let mut candidates = vec![query];
        if rewritten != query {
            candidates.push(&rewritten);
        }

        let mut passages: Vec<String> = Vec::new();
        for candidate in candidates {
            let embedding = self.embedder.embed(candidate).await?;
            let matches = self.index.query(&embedding, top_k).await?;
            debug!(candidate, match_count = matches.len(), "sub-query returned matches");

            for m in &matches {
                if let Some(text) = m.passage_text() {
                    passages.push(text.to_string());
                }
            }
        }

        info!(query, passage_count = passages.len(), "retrieval completed");
        Ok(context::assemble(&passages))
    }
}
