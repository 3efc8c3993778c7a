//! Document type detection — one LLM call plus a lenient label mapping.

use serde::Deserialize;
use tracing::debug;

use crate::analysis::prompts::CLASSIFY_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_HEADER;
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::document::DocumentType;

/// Characters of document text given to the classifier.
const CLASSIFY_SAMPLE_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
struct ClassifyVerdict {
    document_type: String,
}

/// Classifies a document from a text sample.
///
/// The model is asked for one of the known categories, but its answer is
/// mapped leniently: an unrecognized label becomes [`DocumentType::Other`]
/// rather than failing the upload.
pub async fn classify_document(text: &str, llm: &LlmClient) -> Result<DocumentType, AppError> {
    let sample: String = text.chars().take(CLASSIFY_SAMPLE_CHARS).collect();
    let prompt = format!(
        "{JSON_ONLY_HEADER}{}",
        CLASSIFY_PROMPT_TEMPLATE.replace("{text_sample}", &sample)
    );

    let verdict: ClassifyVerdict = llm
        .call_json(
            &prompt,
            CallOptions {
                temperature: 0.1,
                max_output_tokens: 50,
            },
        )
        .await
        .map_err(|e| AppError::Llm(format!("Document classification failed: {e}")))?;

    let doc_type = parse_type_label(&verdict.document_type);
    debug!(label = %verdict.document_type, ?doc_type, "document classified");
    Ok(doc_type)
}

/// Maps a free-form model label onto a [`DocumentType`].
/// Keyword-based so near-miss labels ("CV", "contract", "academic paper")
/// still land in the right bucket.
pub fn parse_type_label(label: &str) -> DocumentType {
    let label = label.to_lowercase();

    if label.contains("resume") || label.contains("cv") {
        DocumentType::Resume
    } else if label.contains("meeting") {
        DocumentType::MeetingNotes
    } else if label.contains("legal") || label.contains("contract") || label.contains("agreement") {
        DocumentType::Legal
    } else if label.contains("research") || label.contains("academic") || label.contains("paper") {
        DocumentType::Research
    } else if label.contains("report") {
        DocumentType::Report
    } else {
        DocumentType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_labels_map_to_types() {
        assert_eq!(parse_type_label("Resume/CV"), DocumentType::Resume);
        assert_eq!(parse_type_label("Meeting Notes"), DocumentType::MeetingNotes);
        assert_eq!(parse_type_label("Legal Document"), DocumentType::Legal);
        assert_eq!(parse_type_label("Research Paper"), DocumentType::Research);
        assert_eq!(parse_type_label("Business Report"), DocumentType::Report);
        assert_eq!(parse_type_label("General Document"), DocumentType::Other);
    }

    #[test]
    fn test_near_miss_labels_still_map() {
        assert_eq!(parse_type_label("CV"), DocumentType::Resume);
        assert_eq!(parse_type_label("employment contract"), DocumentType::Legal);
        assert_eq!(parse_type_label("Academic Paper"), DocumentType::Research);
        assert_eq!(parse_type_label("quarterly financial report"), DocumentType::Report);
    }

    #[test]
    fn test_unknown_label_falls_back_to_other() {
        assert_eq!(parse_type_label("grocery list"), DocumentType::Other);
        assert_eq!(parse_type_label(""), DocumentType::Other);
    }

    #[test]
    fn test_mapping_is_case_insensitive() {
        assert_eq!(parse_type_label("RESUME"), DocumentType::Resume);
        assert_eq!(parse_type_label("mEeTiNg NoTeS"), DocumentType::MeetingNotes);
    }
}
