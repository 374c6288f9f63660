//! Batch ingestion of the pitch PDF into the vector index.
//!
//! Reads a fixed local file path, exits non-zero when the file or a
//! required credential is missing.

use std::path::Path;
use std::sync::Arc;

use rag_chat::{
    AppConfig, FixedSizeChunker, Ingestor, OpenAiEmbeddings, PineconeIndex, RetrievalConfig,
    sources,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const PDF_PATH: &str = "fivebaby_pitch.pdf";
const BATCH_SIZE: usize = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    let retrieval = RetrievalConfig::builder().chunk_size(900).chunk_overlap(150).build()?;

    let records = sources::read_pdf_pages(Path::new(PDF_PATH))?;
    info!(path = PDF_PATH, page_count = records.len(), "read document pages");

    let embedder = Arc::new(OpenAiEmbeddings::new(
        config.embedding_api_key.clone(),
        retrieval.request_timeout(),
    )?);
    let index = Arc::new(
        PineconeIndex::connect(
            config.index_api_key.clone(),
            &config.index_name,
            config.index_host.as_deref(),
            retrieval.request_timeout(),
        )
        .await?,
    );

    let chunker = FixedSizeChunker::new(retrieval.chunk_size, retrieval.chunk_overlap)?;
    let ingestor = Ingestor::new(embedder, index, chunker, BATCH_SIZE);

    let count = ingestor.ingest(&records).await?;
    info!(vector_count = count, "document ingestion finished");
    Ok(())
}
