//! End-to-end pipeline and ingestion tests against in-process fakes.

mod common;

use std::sync::Arc;

use common::{
    EchoCompleter, FailingCompleter, HashEmbedder, RecordingIndex, ScriptedIndex, match_with_text,
};
use rag_chat::{
    ChatPipeline, FixedSizeChunker, InMemoryIndex, Ingestor, RagError, REFUSAL_PHRASE,
    RetrievalConfig, SourceRecord,
};

const CATALOG_ROW: &str =
    "name: Winter Jacket | gender: boys | size: 140 | price: 89000 | color: navy";

fn catalog_record() -> SourceRecord {
    SourceRecord {
        text: CATALOG_ROW.to_string(),
        source: "kids_clothing_catalog_5000.csv".to_string(),
        row: Some(1),
        page: None,
        columns: Some(vec![
            "name".into(),
            "gender".into(),
            "size".into(),
            "price".into(),
            "color".into(),
        ]),
    }
}

fn pipeline_over(
    index: Arc<dyn rag_chat::VectorIndex>,
    completer: Arc<dyn rag_chat::ChatCompleter>,
) -> ChatPipeline {
    ChatPipeline::builder()
        .config(RetrievalConfig::builder().top_k(5).build().unwrap())
        .embedder(Arc::new(HashEmbedder { dimensions: 16 }))
        .index(index)
        .completer(completer)
        .build()
        .unwrap()
}

#[tokio::test]
async fn answers_from_ingested_catalog_row() {
    let embedder = Arc::new(HashEmbedder { dimensions: 16 });
    let index = Arc::new(InMemoryIndex::new());

    let ingestor = Ingestor::new(
        embedder.clone(),
        index.clone(),
        FixedSizeChunker::new(900, 150).unwrap(),
        64,
    );
    let count = ingestor.ingest(&[catalog_record()]).await.unwrap();
    assert_eq!(count, 1);
    assert!(!index.is_empty().await);

    let completer = Arc::new(EchoCompleter::rewriting_to("boys winter jacket size 140"));
    let pipeline = pipeline_over(index, completer);

    let answer = pipeline.ask("boys winter jacket size 140").await.unwrap();
    assert!(answer.contains("Winter Jacket"), "answer should reference the row: {answer}");
    assert!(!answer.contains(REFUSAL_PHRASE));
}

#[tokio::test]
async fn empty_index_yields_the_refusal_phrase() {
    let index = Arc::new(InMemoryIndex::new());
    let completer = Arc::new(EchoCompleter::rewriting_to("quantum computing"));
    let pipeline = pipeline_over(index, completer);

    let answer = pipeline.ask("Квант компьютер гэж юу вэ?").await.unwrap();
    assert!(answer.contains(REFUSAL_PHRASE), "expected refusal, got: {answer}");
}

#[tokio::test]
async fn sub_query_failure_degrades_to_the_refusal_phrase() {
    // The original sub-query succeeds, the rewritten one fails; the
    // pessimistic policy drops all context and the user sees the refusal
    // phrase, never the index error.
    let index = ScriptedIndex::new(vec![
        Ok(vec![match_with_text("a", 0.9, CATALOG_ROW)]),
        Err(RagError::IndexQuery { backend: "fake".into(), message: "down".into() }),
    ]);
    let completer = Arc::new(EchoCompleter::rewriting_to("boys winter jacket"));
    let pipeline = pipeline_over(index, completer);

    let answer = pipeline.ask("өвлийн хүрэм").await.unwrap();
    assert!(answer.contains(REFUSAL_PHRASE), "expected refusal, got: {answer}");
}

#[tokio::test]
async fn generation_failure_propagates_to_the_caller() {
    let index = Arc::new(InMemoryIndex::new());
    let pipeline = pipeline_over(index, Arc::new(FailingCompleter));

    let err = pipeline.ask("хүрэм").await.unwrap_err();
    assert!(matches!(err, RagError::Generation { .. }));
}

#[tokio::test]
async fn ingestor_flushes_full_and_partial_batches() {
    let embedder = Arc::new(HashEmbedder { dimensions: 8 });
    let index = Arc::new(RecordingIndex::default());

    // chunk_size 10 / overlap 2 → step 8; 33 chars → 5 chunks per record.
    let record = SourceRecord {
        text: "abcdefghijklmnopqrstuvwxyz0123456".to_string(),
        source: "test.csv".to_string(),
        row: Some(1),
        page: None,
        columns: None,
    };
    let ingestor = Ingestor::new(
        embedder,
        index.clone(),
        FixedSizeChunker::new(10, 2).unwrap(),
        2,
    );

    let count = ingestor.ingest(&[record]).await.unwrap();
    assert_eq!(count, 5);
    assert_eq!(*index.batches.lock().await, vec![2, 2, 1]);
}

#[tokio::test]
async fn ingested_vectors_carry_provenance_metadata() {
    let embedder = Arc::new(HashEmbedder { dimensions: 8 });
    let index = Arc::new(InMemoryIndex::new());
    let ingestor = Ingestor::new(
        embedder.clone(),
        index.clone(),
        FixedSizeChunker::new(900, 150).unwrap(),
        64,
    );

    ingestor.ingest(&[catalog_record()]).await.unwrap();
    assert_eq!(index.len().await, 1);

    use rag_chat::{EmbeddingProvider, VectorIndex};
    let query = embedder.embed(CATALOG_ROW).await.unwrap();
    let matches = index.query(&query, 1).await.unwrap();
    let metadata = matches[0].metadata.as_ref().unwrap();
    assert_eq!(metadata.text, CATALOG_ROW);
    assert_eq!(metadata.source, "kids_clothing_catalog_5000.csv");
    assert_eq!(metadata.row, Some(1));
    assert!(metadata.columns.as_ref().unwrap().contains(&"size".to_string()));
}
