//! Embedding provider — turns text into vectors for similarity search.
//!
//! Carried in `AppState` as `Arc<dyn Embedder>` so the store and pipeline can
//! be tested against a deterministic stub without network access.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::LlmError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The embedding model used for all similarity vectors in Docsift.
pub const EMBEDDING_MODEL: &str = "text-embedding-004";

/// Produces embedding vectors for document chunks and search queries.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;

    /// Embeds a batch of texts. The default implementation loops over
    /// [`Embedder::embed`]; providers with a batch endpoint should override.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    content: EmbedContent<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: Vec<EmbedPart<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<BatchEmbedEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct BatchEmbedEntry<'a> {
    model: String,
    content: EmbedContent<'a>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// [`Embedder`] backed by the Gemini embedContent API.
#[derive(Clone)]
pub struct GeminiEmbedder {
    client: Client,
    api_key: String,
    max_retries: u32,
}

impl GeminiEmbedder {
    pub fn new(api_key: String, timeout_secs: u64, max_retries: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            // The retry budget counts attempts, so zero would mean no call at all.
            max_retries: max_retries.max(1),
        }
    }

    /// POSTs a JSON body to an embedding endpoint with the same bounded
    /// retry-and-backoff policy as the generation client.
    async fn post_with_retry<B: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, LlmError> {
        let url = format!("{GEMINI_API_BASE}/{EMBEDDING_MODEL}:{endpoint}");

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .header("content-type", "application/json")
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, message);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json().await?);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.max_retries,
        }))
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        debug!(text_len = text.len(), "embedding single text");

        let request = EmbedRequest {
            content: EmbedContent {
                parts: vec![EmbedPart { text }],
            },
        };

        let response: EmbedResponse = self.post_with_retry("embedContent", &request).await?;
        Ok(response.embedding.values)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch_size = texts.len(), "embedding batch");

        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| BatchEmbedEntry {
                    model: format!("models/{EMBEDDING_MODEL}"),
                    content: EmbedContent {
                        parts: vec![EmbedPart { text }],
                    },
                })
                .collect(),
        };

        let response: BatchEmbedResponse =
            self.post_with_retry("batchEmbedContents", &request).await?;
        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic embedder for offline tests.
    pub struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
            // Length-derived vector: stable, cheap, and distinct enough for ranking tests
            let len = text.len() as f32;
            Ok(vec![len, len / 2.0, 1.0])
        }
    }

    #[tokio::test]
    async fn test_default_embed_batch_loops_over_embed() {
        let embedder = StubEmbedder;
        let texts = vec!["ab".to_string(), "abcd".to_string()];
        let vectors = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0][0], 2.0);
        assert_eq!(vectors[1][0], 4.0);
    }

    #[tokio::test]
    async fn test_embed_batch_empty_input() {
        let embedder = StubEmbedder;
        let vectors = embedder.embed_batch(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }

    #[test]
    fn test_zero_retries_clamped_to_one_attempt() {
        let embedder = GeminiEmbedder::new("key".to_string(), 1, 0);
        assert_eq!(embedder.max_retries, 1);
    }

    #[test]
    fn test_embed_response_deserializes() {
        let json = r#"{"embedding": {"values": [0.1, 0.2, 0.3]}}"#;
        let response: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.embedding.values.len(), 3);
    }

    #[test]
    fn test_batch_embed_response_deserializes() {
        let json = r#"{"embeddings": [{"values": [0.1]}, {"values": [0.2]}]}"#;
        let response: BatchEmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.embeddings.len(), 2);
    }
}
