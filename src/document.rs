//! Data types for source records, indexed vectors, and retrieval matches.

use serde::{Deserialize, Serialize};

/// A single record read from an ingestion source: one CSV row or one PDF page.
///
/// Records are immutable once read. `row` is set for tabular sources,
/// `page` for document sources; `columns` carries the CSV header names.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    /// The raw text of the record, before chunking.
    pub text: String,
    /// The source identifier (typically the file path).
    pub source: String,
    /// 1-based row number for tabular sources.
    pub row: Option<u64>,
    /// 1-based page number for document sources.
    pub page: Option<u64>,
    /// Column names for tabular sources.
    pub columns: Option<Vec<String>>,
}

/// Metadata persisted alongside each indexed vector.
///
/// `text` carries the chunk's literal content so retrieval can reconstruct
/// context without a second lookup. The provenance fields mirror
/// [`SourceRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassageMetadata {
    /// The chunk's literal text content.
    pub text: String,
    /// The source identifier the chunk came from.
    pub source: String,
    /// 1-based row number, for chunks of tabular records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u64>,
    /// 1-based page number, for chunks of document records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Column names, for chunks of tabular records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl PassageMetadata {
    /// Build metadata for one chunk of a source record.
    pub fn for_chunk(record: &SourceRecord, chunk_text: impl Into<String>) -> Self {
        Self {
            text: chunk_text.into(),
            source: record.source.clone(),
            row: record.row,
            page: record.page,
            columns: record.columns.clone(),
        }
    }
}

/// An `(id, embedding, metadata)` triple persisted in the vector index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    /// Unique identifier, generated at ingestion time.
    pub id: String,
    /// The embedding vector.
    pub values: Vec<f32>,
    /// Metadata carried with the vector.
    pub metadata: PassageMetadata,
}

/// A single match returned by the vector index for a query vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalMatch {
    /// The id of the matched vector record.
    pub id: String,
    /// Similarity score (higher is more relevant).
    pub score: f32,
    /// Metadata stored with the match, if requested.
    pub metadata: Option<PassageMetadata>,
}

impl RetrievalMatch {
    /// Return the passage text carried in this match's metadata.
    ///
    /// Returns `None` when metadata is absent or the text is empty, so
    /// callers can skip unusable matches in one step.
    pub fn passage_text(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.text.as_str()).filter(|t| !t.is_empty())
    }
}
