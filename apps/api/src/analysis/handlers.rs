//! Axum route handlers for the Analysis API: memory Q&A, suggested
//! questions, and ATS scoring.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::ats::{analyze_ats_score, AtsReport};
use crate::analysis::qa::answer_question;
use crate::analysis::questions::suggest_questions;
use crate::errors::AppError;
use crate::memory::store::SearchHit;
use crate::models::document::DocumentType;
use crate::state::AppState;

/// Chunks retrieved per question by default.
const DEFAULT_TOP_K: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub document_id: Uuid,
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreRequest {
    pub document_id: Uuid,
    pub job_description: Option<String>,
    /// Score a document even when it was not classified as a resume.
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct AtsScoreResponse {
    pub document_id: Uuid,
    pub report: AtsReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ask
///
/// Embeds the question, retrieves the closest stored chunks, and answers
/// from that context only. Fails fast when memory is empty — no LLM call.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    if state.store.is_empty().await {
        return Err(AppError::Validation(
            "No documents in memory. Upload a document before asking questions.".to_string(),
        ));
    }

    let query_embedding = state
        .embedder
        .embed(&request.question)
        .await
        .map_err(|e| AppError::Llm(format!("Query embedding failed: {e}")))?;

    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K).clamp(1, 10);
    let hits = state.store.search(&query_embedding, top_k).await;

    if hits.is_empty() {
        return Err(AppError::NotFound(
            "No relevant content found in memory for this question".to_string(),
        ));
    }

    let answer = answer_question(&hits, &request.question, &state.llm).await?;

    Ok(Json(AskResponse {
        answer,
        sources: hits,
    }))
}

/// GET /api/v1/documents/:id/questions
///
/// Suggests follow-up questions the user could ask about a stored document.
pub async fn handle_suggest_questions(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let document = state
        .store
        .get(document_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Document {document_id} not found")))?;

    let questions = suggest_questions(&document.text, &state.llm).await?;

    Ok(Json(QuestionsResponse {
        document_id,
        questions,
    }))
}

/// POST /api/v1/ats-score
///
/// Scores a stored resume for ATS compatibility against an optional job
/// description. Non-resume documents are rejected unless `force` is set.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<AtsScoreRequest>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    let document = state
        .store
        .get(request.document_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Document {} not found", request.document_id)))?;

    if document.doc_type != DocumentType::Resume && !request.force {
        return Err(AppError::Validation(format!(
            "Document {} is classified as {:?}, not a resume. Set force=true to score it anyway.",
            document.id, document.doc_type
        )));
    }

    let report =
        analyze_ats_score(&document.text, request.job_description.as_deref(), &state.llm).await?;

    Ok(Json(AtsScoreResponse {
        document_id: document.id,
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::config::Config;
    use crate::llm_client::embeddings::Embedder;
    use crate::llm_client::{LlmClient, LlmError};
    use crate::memory::store::DocumentStore;
    use crate::models::document::Document;

    struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let config = Config {
            gemini_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            store_path: "unused.json".to_string(),
            max_retries: 1,
            timeout_secs: 1,
            max_input_chars: 30_000,
            max_upload_bytes: 1024,
        };
        AppState {
            llm: LlmClient::new("test-key".to_string(), 1, 1, 30_000),
            embedder: Arc::new(StubEmbedder),
            store: Arc::new(DocumentStore::open(dir.path().join("store.json")).unwrap()),
            config,
        }
    }

    fn report_document(text: &str) -> Document {
        Document {
            id: Uuid::new_v4(),
            name: "quarterly.pdf".to_string(),
            title: None,
            doc_type: DocumentType::Report,
            page_count: 1,
            text: text.to_string(),
            summary: "a report".to_string(),
            action_items: vec![],
            chunks: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_ask_request_top_k_optional() {
        let request: AskRequest =
            serde_json::from_str(r#"{"question": "what changed?"}"#).unwrap();
        assert!(request.top_k.is_none());
    }

    #[test]
    fn test_ats_request_force_defaults_false() {
        let json = format!(r#"{{"document_id": "{}"}}"#, Uuid::new_v4());
        let request: AtsScoreRequest = serde_json::from_str(&json).unwrap();
        assert!(!request.force);
        assert!(request.job_description.is_none());
    }

    #[tokio::test]
    async fn test_ask_empty_store_rejected_without_llm_call() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        // A Validation error proves the handler stopped at the empty-store
        // check; a real call with this key/timeout would surface as Llm.
        let result = handle_ask(
            State(state),
            Json(AskRequest {
                question: "What are my deadlines?".to_string(),
                top_k: None,
            }),
        )
        .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("No documents in memory")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ask_blank_question_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let result = handle_ask(
            State(state),
            Json(AskRequest {
                question: "   ".to_string(),
                top_k: None,
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_ats_rejects_non_resume_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let doc = report_document("quarterly numbers");
        let id = doc.id;
        state.store.upsert(doc).await.unwrap();

        let result = handle_ats_score(
            State(state),
            Json(AtsScoreRequest {
                document_id: id,
                job_description: None,
                force: false,
            }),
        )
        .await;

        match result {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("not a resume"));
                assert!(msg.contains("force=true"));
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ats_force_proceeds_past_type_gate() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        // Empty text stops the request right after the gate, before any API
        // call, so the error message tells the two branches apart.
        let doc = report_document("");
        let id = doc.id;
        state.store.upsert(doc).await.unwrap();

        let result = handle_ats_score(
            State(state),
            Json(AtsScoreRequest {
                document_id: id,
                job_description: None,
                force: true,
            }),
        )
        .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("Resume text is empty")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ats_unknown_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let result = handle_ats_score(
            State(state),
            Json(AtsScoreRequest {
                document_id: Uuid::new_v4(),
                job_description: None,
                force: false,
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
