//! Deterministic fakes shared by the integration tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use rag_chat::{
    ChatCompleter, ChatMessage, EmbeddingProvider, PassageMetadata, RagError, RetrievalMatch,
    Role, VectorIndex, VectorRecord,
};

/// Deterministic hash-based embeddings, so tests run with zero API keys.
pub struct HashEmbedder {
    pub dimensions: usize,
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> rag_chat::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let hash = text
                    .bytes()
                    .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
                let mut emb = vec![0.0f32; self.dimensions];
                for (i, v) in emb.iter_mut().enumerate() {
                    *v = ((hash.wrapping_add(i as u64)) as f32).sin();
                }
                let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm > 0.0 {
                    emb.iter_mut().for_each(|x| *x /= norm);
                }
                emb
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// An embedder that always fails, for exercising degraded paths.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed_batch(&self, _texts: &[&str]) -> rag_chat::Result<Vec<Vec<f32>>> {
        Err(RagError::Embedding { provider: "fake".into(), message: "unavailable".into() })
    }

    fn dimensions(&self) -> usize {
        4
    }
}

/// A completer driven by the call's shape.
///
/// Rewrite calls (temperature 0.0) return `rewrite` when set, or an error
/// when `fail_rewrites` is set. Answer calls echo the CONTEXT block back,
/// or return the refusal phrase when the context is empty — a deterministic
/// stand-in for the grounding policy a live model follows.
pub struct EchoCompleter {
    pub rewrite: Option<String>,
    pub fail_rewrites: bool,
}

impl EchoCompleter {
    pub fn rewriting_to(rewrite: impl Into<String>) -> Self {
        Self { rewrite: Some(rewrite.into()), fail_rewrites: false }
    }

    pub fn without_rewrites() -> Self {
        Self { rewrite: None, fail_rewrites: true }
    }
}

#[async_trait]
impl ChatCompleter for EchoCompleter {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> rag_chat::Result<String> {
        if temperature == 0.0 {
            if self.fail_rewrites {
                return Err(RagError::Generation {
                    provider: "fake".into(),
                    message: "rewrite unavailable".into(),
                });
            }
            return Ok(self.rewrite.clone().unwrap_or_default());
        }

        let user = messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let context = user
            .split_once("CONTEXT:\n")
            .and_then(|(_, rest)| rest.split_once("\n\nQUESTION:"))
            .map(|(context, _)| context.trim())
            .unwrap_or_default();

        if context.is_empty() {
            Ok(rag_chat::REFUSAL_PHRASE.to_string())
        } else {
            Ok(format!("Хариулт: {context}"))
        }
    }
}

/// A completer that always fails, for generation-error propagation tests.
pub struct FailingCompleter;

#[async_trait]
impl ChatCompleter for FailingCompleter {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
    ) -> rag_chat::Result<String> {
        Err(RagError::Generation { provider: "fake".into(), message: "unavailable".into() })
    }
}

/// A vector index that replays scripted query responses in order.
pub struct ScriptedIndex {
    responses: Mutex<VecDeque<rag_chat::Result<Vec<RetrievalMatch>>>>,
    pub query_count: AtomicUsize,
}

impl ScriptedIndex {
    pub fn new(responses: Vec<rag_chat::Result<Vec<RetrievalMatch>>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            query_count: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl VectorIndex for ScriptedIndex {
    async fn upsert(&self, _records: &[VectorRecord]) -> rag_chat::Result<()> {
        Ok(())
    }

    async fn query(
        &self,
        _embedding: &[f32],
        _top_k: usize,
    ) -> rag_chat::Result<Vec<RetrievalMatch>> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().await.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// A vector index that records the size of each upserted batch.
#[derive(Default)]
pub struct RecordingIndex {
    pub batches: Mutex<Vec<usize>>,
}

#[async_trait]
impl VectorIndex for RecordingIndex {
    async fn upsert(&self, records: &[VectorRecord]) -> rag_chat::Result<()> {
        self.batches.lock().await.push(records.len());
        Ok(())
    }

    async fn query(
        &self,
        _embedding: &[f32],
        _top_k: usize,
    ) -> rag_chat::Result<Vec<RetrievalMatch>> {
        Ok(Vec::new())
    }
}

/// Build a retrieval match carrying `text` as passage metadata.
pub fn match_with_text(id: &str, score: f32, text: &str) -> RetrievalMatch {
    RetrievalMatch {
        id: id.to_string(),
        score,
        metadata: Some(PassageMetadata {
            text: text.to_string(),
            source: "test.csv".to_string(),
            row: Some(1),
            page: None,
            columns: None,
        }),
    }
}
