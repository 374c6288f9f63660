//! Fixed-size text chunking with overlap.
//!
//! Splitting is purely character-offset based with no semantic boundary
//! awareness; that is the documented contract, not a defect to fix here.

use crate::error::{RagError, Result};

/// Splits text into fixed-width sliding windows of characters.
///
/// Window *i* starts at `i * (chunk_size - overlap)` and spans `chunk_size`
/// characters (shorter at the tail). Newlines are collapsed to spaces before
/// splitting. Offsets are counted in characters rather than bytes so that
/// multi-byte text (the catalog is Cyrillic) never splits inside a code point.
///
/// # Example
///
/// ```rust,ignore
/// use rag_chat::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(900, 150)?;
/// let chunks = chunker.chunk("one long catalog row ...");
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidChunking`] if `overlap >= chunk_size`
    /// (which would never terminate) or `chunk_size == 0`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::InvalidChunking("chunk_size must be greater than zero".into()));
        }
        if overlap >= chunk_size {
            return Err(RagError::InvalidChunking(format!(
                "overlap ({overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    /// Split `text` into overlapping windows.
    ///
    /// Returns an empty `Vec` for empty input.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let normalized: Vec<char> =
            text.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
        if normalized.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < normalized.len() {
            let end = (start + self.chunk_size).min(normalized.len());
            chunks.push(normalized[start..end].iter().collect());
            start += step;
        }

        chunks
    }
}
