//! Pinecone vector index backend.
//!
//! Provides [`PineconeIndex`], a [`VectorIndex`] over the Pinecone data-plane
//! REST API. The data-plane host is taken from the `INDEX_HOST` override when
//! present; otherwise it is resolved once at connect time by describing the
//! index on the control plane.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::document::{PassageMetadata, RetrievalMatch, VectorRecord};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorIndex;

/// The Pinecone control-plane base URL, used to resolve an index host by name.
const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// A [`VectorIndex`] backed by a Pinecone serverless index.
///
/// # Example
///
/// ```rust,ignore
/// use rag_chat::pinecone::PineconeIndex;
///
/// let index = PineconeIndex::connect(api_key, "rag-chat-demo", None, timeout).await?;
/// index.upsert(&records).await?;
/// let matches = index.query(&query_embedding, 5).await?;
/// ```
pub struct PineconeIndex {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    score: f32,
    metadata: Option<PassageMetadata>,
}

impl PineconeIndex {
    /// Connect to a Pinecone index.
    ///
    /// When `host` is `None`, the host is resolved from the control plane by
    /// index name. The returned handle is stateless and shareable.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the API key is empty or host
    /// resolution fails.
    pub async fn connect(
        api_key: impl Into<String>,
        index_name: &str,
        host: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Config("index API key must not be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RagError::Config(format!("failed to build HTTP client: {e}")))?;

        let host = match host {
            Some(h) => h.to_string(),
            None => Self::resolve_host(&client, &api_key, index_name).await?,
        };
        let base_url =
            if host.starts_with("http") { host } else { format!("https://{host}") };

        debug!(index = index_name, %base_url, "connected to pinecone index");
        Ok(Self { client, api_key, base_url })
    }

    /// Resolve the data-plane host for `index_name` via the control plane.
    async fn resolve_host(
        client: &reqwest::Client,
        api_key: &str,
        index_name: &str,
    ) -> Result<String> {
        let url = format!("{CONTROL_PLANE_URL}/indexes/{index_name}");
        let response = client
            .get(&url)
            .header("Api-Key", api_key)
            .send()
            .await
            .map_err(|e| RagError::Config(format!("failed to describe index: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(RagError::Config(format!(
                "failed to describe index '{index_name}': control plane returned {status}"
            )));
        }

        let described: DescribeIndexResponse = response
            .json()
            .await
            .map_err(|e| RagError::Config(format!("failed to parse describe response: {e}")))?;
        Ok(described.host)
    }

    fn map_transport_err(e: reqwest::Error, operation: &str) -> RagError {
        if e.is_timeout() {
            RagError::Timeout { operation: operation.to_string() }
        } else if operation.contains("upsert") {
            RagError::IndexUpsert { backend: "pinecone".into(), message: e.to_string() }
        } else {
            RagError::IndexQuery { backend: "pinecone".into(), message: e.to_string() }
        }
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let url = format!("{}/vectors/upsert", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&UpsertRequest { vectors: records })
            .send()
            .await
            .map_err(|e| {
                error!(backend = "pinecone", error = %e, "upsert request failed");
                Self::map_transport_err(e, "index upsert")
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(backend = "pinecone", %status, "upsert API error");
            return Err(RagError::IndexUpsert {
                backend: "pinecone".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        debug!(backend = "pinecone", count = records.len(), "upserted vectors");
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievalMatch>> {
        let url = format!("{}/query", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&QueryRequest { vector: embedding, top_k, include_metadata: true })
            .send()
            .await
            .map_err(|e| {
                error!(backend = "pinecone", error = %e, "query request failed");
                Self::map_transport_err(e, "index query")
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(backend = "pinecone", %status, "query API error");
            return Err(RagError::IndexQuery {
                backend: "pinecone".into(),
                message: format!("API returned {status}: {body}"),
            });
        }

        let query_response: QueryResponse = response.json().await.map_err(|e| {
            error!(backend = "pinecone", error = %e, "failed to parse query response");
            RagError::IndexQuery {
                backend: "pinecone".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(query_response
            .matches
            .into_iter()
            .map(|m| RetrievalMatch { id: m.id, score: m.score, metadata: m.metadata })
            .collect())
    }
}
