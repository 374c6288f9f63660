//! Property and edge-case tests for fixed-size chunking.

use proptest::prelude::*;
use rag_chat::{FixedSizeChunker, RagError};

#[test]
fn rejects_overlap_equal_to_chunk_size() {
    let err = FixedSizeChunker::new(100, 100).unwrap_err();
    assert!(matches!(err, RagError::InvalidChunking(_)));
}

#[test]
fn rejects_overlap_greater_than_chunk_size() {
    let err = FixedSizeChunker::new(100, 150).unwrap_err();
    assert!(matches!(err, RagError::InvalidChunking(_)));
}

#[test]
fn rejects_zero_chunk_size() {
    let err = FixedSizeChunker::new(0, 0).unwrap_err();
    assert!(matches!(err, RagError::InvalidChunking(_)));
}

#[test]
fn empty_text_yields_no_chunks() {
    let chunker = FixedSizeChunker::new(900, 150).unwrap();
    assert!(chunker.chunk("").is_empty());
}

#[test]
fn short_text_yields_single_chunk() {
    let chunker = FixedSizeChunker::new(900, 150).unwrap();
    assert_eq!(chunker.chunk("winter jacket"), vec!["winter jacket".to_string()]);
}

#[test]
fn newlines_are_collapsed_to_spaces() {
    let chunker = FixedSizeChunker::new(900, 150).unwrap();
    assert_eq!(chunker.chunk("a\nb\nc"), vec!["a b c".to_string()]);
}

#[test]
fn windows_overlap_by_configured_amount() {
    let chunker = FixedSizeChunker::new(10, 4).unwrap();
    let text = "abcdefghijklmnopqrstuvwxyz";
    let chunks = chunker.chunk(text);
    // step = 6: windows start at 0, 6, 12, 18, 24
    assert_eq!(chunks, vec!["abcdefghij", "ghijklmnop", "mnopqrstuv", "stuvwxyz", "yz"]);
}

#[test]
fn multibyte_text_splits_on_character_boundaries() {
    let chunker = FixedSizeChunker::new(5, 2).unwrap();
    let chunks = chunker.chunk("өвлийн хүрэм");
    assert_eq!(chunks[0], "өвлий");
    assert_eq!(chunks[0].chars().count(), 5);
}

proptest! {
    /// For all non-empty text and valid `0 <= overlap < chunk_size`:
    /// chunks are non-empty and ordered with strictly increasing start
    /// offsets, each chunk is at most `chunk_size` characters, and the
    /// windows cover the whole (normalized) text.
    #[test]
    fn windows_cover_text_in_order(
        text in ".{1,400}",
        chunk_size in 1usize..64,
        overlap_fraction in 0.0f64..1.0,
    ) {
        let overlap = ((chunk_size as f64) * overlap_fraction) as usize;
        prop_assume!(overlap < chunk_size);

        let chunker = FixedSizeChunker::new(chunk_size, overlap).unwrap();
        let chunks = chunker.chunk(&text);

        let normalized: String =
            text.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
        let total_chars = normalized.chars().count();
        let step = chunk_size - overlap;

        prop_assert!(!chunks.is_empty());
        prop_assert_eq!(chunks.len(), total_chars.div_ceil(step));

        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert!(!chunk.is_empty());
            prop_assert!(chunk.chars().count() <= chunk_size);

            // Window i starts at exactly i * step in the normalized text.
            let expected: String = normalized
                .chars()
                .skip(i * step)
                .take(chunk.chars().count())
                .collect();
            prop_assert_eq!(chunk, &expected);
        }

        // Concatenating the non-overlapping spans reconstructs the text.
        let mut rebuilt: String = chunks[0].clone();
        for chunk in &chunks[1..] {
            let skip = overlap.min(chunk.chars().count());
            rebuilt.extend(chunk.chars().skip(skip));
        }
        prop_assert_eq!(rebuilt, normalized);
    }
}
