//! Interactive chat REPL over the indexed knowledge base.
//!
//! Holds the session's message history in memory only, as the session's
//! turn record; each question is answered statelessly by the pipeline and
//! never reads prior turns. The terminal scrollback does the rendering.

use std::sync::Arc;

use rag_chat::{
    AppConfig, ChatMessage, ChatPipeline, OpenAiCompleter, OpenAiEmbeddings, PineconeIndex,
    RetrievalConfig,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = AppConfig::from_env()?;
    let retrieval = RetrievalConfig::builder().top_k(5).build()?;

    let embedder = Arc::new(OpenAiEmbeddings::new(
        config.embedding_api_key.clone(),
        retrieval.request_timeout(),
    )?);
    let completer = Arc::new(OpenAiCompleter::new(
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

    let pipeline = ChatPipeline::builder()
        .config(retrieval)
        .embedder(embedder)
        .index(index)
        .completer(completer)
        .build()?;

    // Turn record only; answering never depends on prior turns.
    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all("Асуух зүйлээ бичээрэй (exit гэж бичвэл гарна):\n".as_bytes()).await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else { break };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            break;
        }

        history.push(ChatMessage::user(question));
        match pipeline.ask(question).await {
            Ok(answer) => {
                stdout.write_all(format!("{answer}\n").as_bytes()).await?;
                history.push(ChatMessage::assistant(answer));
            }
            Err(e) => {
                stdout.write_all(format!("Алдаа гарлаа: {e}\n").as_bytes()).await?;
            }
        }
    }

    Ok(())
}
