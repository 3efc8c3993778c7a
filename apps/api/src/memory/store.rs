//! Local serialized document store with cosine-similarity search.
//!
//! The whole collection lives behind one `tokio::sync::RwLock` and is
//! written wholesale to a JSON file after every mutation — no fine-grained
//! locking, no partial writes (temp file + atomic rename). This is a
//! single-user store; the lock exists so axum handlers can share it, not to
//! arbitrate writers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::document::{Document, DocumentSummary};

/// A similarity hit: one chunk of one stored document.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub document_id: Uuid,
    pub document_name: String,
    pub text: String,
    pub score: f32,
}

/// Counts surfaced by the memory stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryStats {
    pub total_documents: usize,
    pub total_chunks: usize,
    /// Size of the serialized store on disk, in bytes.
    pub store_bytes: u64,
}

pub struct DocumentStore {
    path: PathBuf,
    documents: RwLock<HashMap<Uuid, Document>>,
}

impl DocumentStore {
    /// Opens the store at `path`, loading the existing collection if the file
    /// exists. A missing file is an empty store, not an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let documents: HashMap<Uuid, Document> = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Store file {} is corrupt", path.display()))?
        } else {
            HashMap::new()
        };

        info!(
            "Document store opened: {} documents at {}",
            documents.len(),
            path.display()
        );

        Ok(Self {
            path,
            documents: RwLock::new(documents),
        })
    }

    /// Inserts or replaces a document, then persists the whole collection.
    pub async fn upsert(&self, document: Document) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id, document);
        self.save(&documents)
    }

    pub async fn get(&self, id: Uuid) -> Option<Document> {
        self.documents.read().await.get(&id).cloned()
    }

    /// Lists all documents, newest first, without raw text or vectors.
    pub async fn list(&self) -> Vec<DocumentSummary> {
        let documents = self.documents.read().await;
        let mut summaries: Vec<DocumentSummary> =
            documents.values().map(DocumentSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// Removes a document. Returns false if the id was not present.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut documents = self.documents.write().await;
        let removed = documents.remove(&id).is_some();
        if removed {
            self.save(&documents)?;
        }
        Ok(removed)
    }

    /// Clears the entire collection.
    pub async fn clear(&self) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.clear();
        self.save(&documents)
    }

    pub async fn stats(&self) -> MemoryStats {
        let documents = self.documents.read().await;
        let total_chunks = documents.values().map(|d| d.chunks.len()).sum();
        let store_bytes = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        MemoryStats {
            total_documents: documents.len(),
            total_chunks,
            store_bytes,
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Ranks every stored chunk against the query embedding by cosine
    /// similarity and returns the top `top_k` hits.
    pub async fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<SearchHit> {
        let documents = self.documents.read().await;

        let mut hits: Vec<SearchHit> = documents
            .values()
            .flat_map(|doc| {
                doc.chunks.iter().map(|chunk| SearchHit {
                    document_id: doc.id,
                    document_name: doc.name.clone(),
                    text: chunk.text.clone(),
                    score: cosine_similarity(&chunk.embedding, query_embedding),
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        hits
    }

    /// Serializes the full collection to a temp file and renames it over the
    /// store path so a crash mid-write never leaves a half-written store.
    fn save(&self, documents: &HashMap<Uuid, Document>) -> Result<()> {
        let json = serde_json::to_string(documents).context("Failed to serialize store")?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir),
            None => tempfile::NamedTempFile::new_in("."),
        }
        .context("Failed to create temp file for store write")?;

        std::io::Write::write_all(&mut tmp, json.as_bytes())
            .context("Failed to write store temp file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to persist store to {}", self.path.display()))?;

        Ok(())
    }
}

/// Cosine similarity between two vectors.
/// Returns 0.0 for zero-magnitude or mismatched-width vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
