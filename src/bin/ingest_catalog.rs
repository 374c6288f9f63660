//! Batch ingestion of the kids' clothing catalog CSV into the vector index.
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

const CSV_PATH: &str = "kids_clothing_catalog_5000.csv";
const BATCH_SIZE: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    let retrieval = RetrievalConfig::builder().chunk_size(900).chunk_overlap(150).build()?;

    let records = sources::read_catalog_csv(Path::new(CSV_PATH))?;
    info!(path = CSV_PATH, row_count = records.len(), "read catalog rows");

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
    info!(vector_count = count, "catalog ingestion finished");
    Ok(())
}
