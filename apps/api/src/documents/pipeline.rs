//! Document ingestion — orchestrates the full upload pipeline.
//!
//! Flow: extract_pdf → classify → summarize/extract tasks → chunk →
//!       embed → persist to the store → return the stored document.
//!
//! Re-analysis reuses the stored text and replaces the classification,
//! summary, and action items in place.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::analysis::classifier::classify_document;
use crate::analysis::summarize::analyze_document;
use crate::errors::AppError;
use crate::extraction::{extract_pdf, ExtractError};
use crate::llm_client::embeddings::Embedder;
use crate::llm_client::LlmClient;
use crate::memory::chunking::chunk_text_default;
use crate::memory::store::DocumentStore;
use crate::models::document::{Document, DocumentChunk};

/// Runs the full ingestion pipeline for an uploaded PDF and persists the result.
///
/// Steps:
/// 1. extract_pdf() → text + metadata (all validation happens here)
/// 2. classify_document() → DocumentType
/// 3. analyze_document() → summary + action items
/// 4. chunk text (+ summary as its own chunk, so summaries are searchable)
/// 5. embed_batch() → one vector per chunk
/// 6. upsert into the document store
pub async fn ingest_document(
    name: &str,
    data: &[u8],
    max_upload_bytes: usize,
    llm: &LlmClient,
    embedder: &dyn Embedder,
    store: &DocumentStore,
) -> Result<Document, AppError> {
    // Step 1: Extract text — rejects oversized/unparsable/empty uploads
    // before any API call is attempted.
    let extracted = extract_pdf(data, max_upload_bytes).map_err(extract_error_to_app)?;
    info!(
        "Extracted {} chars from '{}' ({} pages)",
        extracted.text.len(),
        name,
        extracted.page_count
    );

    // Step 2: Classify
    let doc_type = classify_document(&extracted.text, llm).await?;
    info!("'{}' classified as {:?}", name, doc_type);

    // Step 3: Summary + action items
    let outcome = analyze_document(&extracted.text, doc_type, llm).await?;

    // Steps 4–5: Chunk and embed
    let chunk_texts = build_chunk_texts(&extracted.text, &outcome.summary);
    let embeddings = embedder
        .embed_batch(&chunk_texts)
        .await
        .map_err(|e| AppError::Llm(format!("Chunk embedding failed: {e}")))?;

    if embeddings.len() != chunk_texts.len() {
        return Err(AppError::Llm(format!(
            "Embedding count mismatch: {} chunks, {} vectors",
            chunk_texts.len(),
            embeddings.len()
        )));
    }

    let chunks: Vec<DocumentChunk> = chunk_texts
        .into_iter()
        .zip(embeddings)
        .map(|(text, embedding)| DocumentChunk { text, embedding })
        .collect();

    // Step 6: Persist
    let now = Utc::now();
    let document = Document {
        id: Uuid::new_v4(),
        name: name.to_string(),
        title: extracted.title,
        doc_type,
        page_count: extracted.page_count,
        text: extracted.text,
        summary: outcome.summary,
        action_items: outcome.action_items,
        chunks,
        created_at: now,
        updated_at: now,
    };

    store
        .upsert(document.clone())
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    info!(
        "Stored document {} ('{}') with {} chunks",
        document.id,
        document.name,
        document.chunks.len()
    );

    Ok(document)
}

/// Re-runs classification and analysis over a stored document's text and
/// updates it in place. Chunks and embeddings are kept — the text is unchanged.
pub async fn reanalyze_document(
    document_id: Uuid,
    llm: &LlmClient,
    store: &DocumentStore,
) -> Result<Document, AppError> {
    let mut document = store
        .get(document_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Document {document_id} not found")))?;

    let doc_type = classify_document(&document.text, llm).await?;
    let outcome = analyze_document(&document.text, doc_type, llm).await?;

    document.doc_type = doc_type;
    document.summary = outcome.summary;
    document.action_items = outcome.action_items;
    document.updated_at = Utc::now();

    store
        .upsert(document.clone())
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    info!("Re-analyzed document {} as {:?}", document.id, doc_type);

    Ok(document)
}

/// Word-window chunks of the raw text, plus the summary as one extra chunk.
/// A search can then land on either the wording of the document or the
/// generated summary of it.
fn build_chunk_texts(text: &str, summary: &str) -> Vec<String> {
    let mut chunk_texts = chunk_text_default(text);
    if !summary.trim().is_empty() {
        chunk_texts.push(summary.trim().to_string());
    }
    chunk_texts
}

fn extract_error_to_app(err: ExtractError) -> AppError {
    match err {
        ExtractError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
        ExtractError::Parse(_) | ExtractError::Empty => {
            AppError::UnprocessableEntity(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_texts_include_summary() {
        let chunks = build_chunk_texts("some document body", "the summary");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.last().unwrap(), "the summary");
    }

    #[test]
    fn test_blank_summary_not_added_as_chunk() {
        let chunks = build_chunk_texts("some document body", "   ");
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_oversized_maps_to_payload_too_large() {
        let err = extract_error_to_app(ExtractError::TooLarge {
            actual: 10,
            limit: 5,
        });
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_parse_failure_maps_to_unprocessable() {
        let err = extract_error_to_app(ExtractError::Parse("bad xref".to_string()));
        assert!(matches!(err, AppError::UnprocessableEntity(_)));

        let err = extract_error_to_app(ExtractError::Empty);
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
