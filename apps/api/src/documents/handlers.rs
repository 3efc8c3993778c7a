//! Axum route handlers for the Documents API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::documents::pipeline::{ingest_document, reanalyze_document};
use crate::errors::AppError;
use crate::models::document::{Document, DocumentSummary};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: DocumentSummary,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

/// Detail view: the summary fields plus the raw extracted text.
/// Embedding vectors stay inside the store.
#[derive(Debug, Serialize)]
pub struct DocumentDetailResponse {
    pub document: DocumentSummary,
    pub text: String,
}

impl From<Document> for DocumentDetailResponse {
    fn from(doc: Document) -> Self {
        Self {
            document: DocumentSummary::from(&doc),
            text: doc.text,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
///
/// Multipart PDF upload. Runs the full ingestion pipeline and returns the
/// stored document. The multipart field must be named `file`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .unwrap_or("upload.pdf")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        upload = Some((name, data));
        break;
    }

    let (name, data) = upload.ok_or_else(|| {
        AppError::Validation("Missing multipart field 'file' with a PDF upload".to_string())
    })?;

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let document = ingest_document(
        &name,
        &data,
        state.config.max_upload_bytes,
        &state.llm,
        state.embedder.as_ref(),
        &state.store,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            document: DocumentSummary::from(&document),
        }),
    ))
}

/// GET /api/v1/documents
pub async fn handle_list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    Json(DocumentListResponse {
        documents: state.store.list().await,
    })
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<DocumentDetailResponse>, AppError> {
    let document = state
        .store
        .get(document_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Document {document_id} not found")))?;

    Ok(Json(document.into()))
}

/// DELETE /api/v1/documents/:id
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .store
        .delete(document_id)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    if !removed {
        return Err(AppError::NotFound(format!(
            "Document {document_id} not found"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:id/reanalyze
///
/// Re-runs classification and summarization over the stored text and
/// updates the document in place.
pub async fn handle_reanalyze(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = reanalyze_document(document_id, &state.llm, &state.store).await?;

    Ok(Json(DocumentResponse {
        document: DocumentSummary::from(&document),
    }))
}
