//! Ingestion source readers: CSV catalog rows and PDF pages.
//!
//! These are thin I/O wrappers around the `csv` and `lopdf` crates that
//! produce [`SourceRecord`]s for the [`Ingestor`](crate::ingest::Ingestor).

use std::path::Path;

use tracing::{debug, warn};

use crate::document::SourceRecord;
use crate::error::{RagError, Result};

/// Read a CSV catalog into one [`SourceRecord`] per row.
///
/// Each row is rendered as `"col: value | col: value | ..."` using the
/// header names, with 1-based row numbers and the column list attached as
/// metadata.
///
/// # Errors
///
/// Returns [`RagError::Source`] if the file is missing or malformed.
pub fn read_catalog_csv(path: &Path) -> Result<Vec<SourceRecord>> {
    let source_err = |message: String| RagError::Source {
        path: path.display().to_string(),
        message,
    };

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| source_err(format!("failed to open CSV: {e}")))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| source_err(format!("failed to read CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let source = path.display().to_string();
    let mut records = Vec::new();

    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(|e| source_err(format!("failed to read CSV row: {e}")))?;
        let text = columns
            .iter()
            .zip(row.iter())
            .map(|(col, value)| format!("{col}: {value}"))
            .collect::<Vec<_>>()
            .join(" | ");

        records.push(SourceRecord {
            text,
            source: source.clone(),
            row: Some(i as u64 + 1),
            page: None,
            columns: Some(columns.clone()),
        });
    }

    debug!(path = %source, row_count = records.len(), "read CSV catalog");
    Ok(records)
}

/// Read a PDF into one [`SourceRecord`] per non-empty page.
///
/// Pages whose text extraction fails are skipped with a warning, matching
/// the tolerant behavior expected of scanned or partially damaged sources.
/// Page numbers are 1-based.
///
/// # Errors
///
/// Returns [`RagError::Source`] if the file is missing or not a PDF.
pub fn read_pdf_pages(path: &Path) -> Result<Vec<SourceRecord>> {
    let doc = lopdf::Document::load(path).map_err(|e| RagError::Source {
        path: path.display().to_string(),
        message: format!("failed to load PDF: {e}"),
    })?;

    let source = path.display().to_string();
    let mut records = Vec::new();

    for (page_number, _) in doc.get_pages() {
        match doc.extract_text(&[page_number]) {
            Ok(text) if !text.trim().is_empty() => {
                records.push(SourceRecord {
                    text,
                    source: source.clone(),
                    row: None,
                    page: Some(page_number as u64),
                    columns: None,
                });
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %source, page = page_number, error = %e, "skipping unreadable page");
            }
        }
    }

    debug!(path = %source, page_count = records.len(), "read PDF pages");
    Ok(records)
}
