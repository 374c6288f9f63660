//! Retrieval-augmented chat over a catalog knowledge base.
//!
//! `rag-chat` ingests catalog and document data into an external vector
//! index, embeds user questions, retrieves relevant passages, and asks a
//! generative model to answer using only the retrieved context.
//!
//! The per-question flow is: question → [`QueryRewriter`] → hybrid
//! fan-out over the literal and rewritten queries ([`HybridRetriever`]) →
//! deduplicated context assembly ([`context::assemble`]) →
//! grounded answer generation ([`AnswerGenerator`]). The ingestion flow is:
//! source records → [`FixedSizeChunker`] → batched embedding → index upsert
//! ([`Ingestor`]).
//!
//! External services are consumed through narrow capability traits
//! ([`EmbeddingProvider`], [`ChatCompleter`], [`VectorIndex`]) so concrete
//! providers are swappable and tests run against deterministic fakes.

pub mod answer;
pub mod chunking;
pub mod completion;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod inmemory;
pub mod openai;
pub mod pinecone;
pub mod pipeline;
pub mod retrieve;
pub mod rewrite;
pub mod sources;
pub mod vectorstore;

pub use answer::{AnswerGenerator, REFUSAL_PHRASE};
pub use chunking::FixedSizeChunker;
pub use completion::{ChatCompleter, ChatMessage, Role};
pub use config::{AppConfig, RetrievalConfig};
pub use document::{PassageMetadata, RetrievalMatch, SourceRecord, VectorRecord};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use ingest::Ingestor;
pub use inmemory::InMemoryIndex;
pub use openai::{OpenAiCompleter, OpenAiEmbeddings};
pub use pinecone::PineconeIndex;
pub use pipeline::ChatPipeline;
pub use retrieve::HybridRetriever;
pub use rewrite::QueryRewriter;
pub use vectorstore::VectorIndex;
