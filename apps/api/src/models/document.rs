use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inferred document category. Drives the type-specific analysis prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Resume,
    MeetingNotes,
    Legal,
    Research,
    Report,
    #[default]
    Other,
}

impl DocumentType {
    /// Human-readable label used inside prompts.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Resume => "Resume/CV",
            DocumentType::MeetingNotes => "Meeting Notes",
            DocumentType::Legal => "Legal Document",
            DocumentType::Research => "Research Paper",
            DocumentType::Report => "Business Report",
            DocumentType::Other => "General Document",
        }
    }
}

/// A chunk of document text with its embedding vector.
/// Chunks are what similarity search ranks; they never leave the store
/// without their parent document id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A stored document. Owned exclusively by the document store: created on
/// upload, updated on re-analysis, deleted on explicit removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// Original upload filename.
    pub name: String,
    /// Title from the PDF Info dictionary, when present.
    pub title: Option<String>,
    pub doc_type: DocumentType,
    pub page_count: usize,
    /// Raw extracted text. Kept in full — re-analysis re-reads it.
    pub text: String,
    pub summary: String,
    pub action_items: Vec<String>,
    pub chunks: Vec<DocumentChunk>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing view of a document — everything except the raw text and vectors.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub doc_type: DocumentType,
    pub page_count: usize,
    pub summary: String,
    pub action_items: Vec<String>,
    pub chunk_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            name: doc.name.clone(),
            title: doc.title.clone(),
            doc_type: doc.doc_type,
            page_count: doc.page_count,
            summary: doc.summary.clone(),
            action_items: doc.action_items.clone(),
            chunk_count: doc.chunks.len(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&DocumentType::MeetingNotes).unwrap(),
            "\"meeting-notes\""
        );
        assert_eq!(
            serde_json::to_string(&DocumentType::Resume).unwrap(),
            "\"resume\""
        );
    }

    #[test]
    fn test_document_type_roundtrip() {
        for ty in [
            DocumentType::Resume,
            DocumentType::MeetingNotes,
            DocumentType::Legal,
            DocumentType::Research,
            DocumentType::Report,
            DocumentType::Other,
        ] {
            let json = serde_json::to_string(&ty).unwrap();
            let back: DocumentType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ty);
        }
    }

    #[test]
    fn test_document_type_default_is_other() {
        assert_eq!(DocumentType::default(), DocumentType::Other);
    }

    #[test]
    fn test_summary_view_omits_text_and_counts_chunks() {
        let doc = Document {
            id: Uuid::new_v4(),
            name: "notes.pdf".to_string(),
            title: None,
            doc_type: DocumentType::MeetingNotes,
            page_count: 2,
            text: "full text".to_string(),
            summary: "a summary".to_string(),
            action_items: vec!["follow up".to_string()],
            chunks: vec![
                DocumentChunk {
                    text: "full".to_string(),
                    embedding: vec![0.1],
                },
                DocumentChunk {
                    text: "text".to_string(),
                    embedding: vec![0.2],
                },
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = DocumentSummary::from(&doc);
        assert_eq!(view.chunk_count, 2);
        assert_eq!(view.summary, "a summary");
    }
}
