mod analysis;
mod config;
mod documents;
mod errors;
mod extraction;
mod llm_client;
mod memory;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::embeddings::GeminiEmbedder;
use crate::llm_client::LlmClient;
use crate::memory::store::DocumentStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Docsift v{}", env!("CARGO_PKG_VERSION"));

    // Open the document store (loads the serialized collection if present)
    let store = Arc::new(DocumentStore::open(&config.store_path)?);

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.timeout_secs,
        config.max_retries,
        config.max_input_chars,
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize embedding provider
    let embedder = Arc::new(GeminiEmbedder::new(
        config.gemini_api_key.clone(),
        config.timeout_secs,
        config.max_retries,
    ));
    info!(
        "Embedder initialized (model: {})",
        llm_client::embeddings::EMBEDDING_MODEL
    );

    // Build app state
    let state = AppState {
        llm,
        embedder,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // local single-user UI host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
