use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::embeddings::Embedder;
use crate::llm_client::LlmClient;
use crate::memory::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable embedding provider. Default: GeminiEmbedder. Tests use a stub.
    pub embedder: Arc<dyn Embedder>,
    pub store: Arc<DocumentStore>,
    pub config: Config,
}
