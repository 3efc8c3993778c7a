//! Summary and action-item generation, with a type-specific prompt per
//! document category.

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{
    GENERIC_ANALYSIS_TEMPLATE, LEGAL_ANALYSIS_TEMPLATE, MEETING_ANALYSIS_TEMPLATE,
    RESEARCH_ANALYSIS_TEMPLATE, RESUME_ANALYSIS_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_HEADER;
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::document::DocumentType;

/// Transient analysis result. Attached to a `Document` by the pipeline;
/// never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub summary: String,
    #[serde(default)]
    pub action_items: Vec<String>,
}

/// Characters of document text each category's prompt carries.
/// Legal and research documents get a larger window — key terms and findings
/// tend to sit deeper in the body.
fn text_budget(doc_type: DocumentType) -> usize {
    match doc_type {
        DocumentType::Resume | DocumentType::MeetingNotes => 2500,
        DocumentType::Legal => 3500,
        DocumentType::Research | DocumentType::Report | DocumentType::Other => 3000,
    }
}

/// Builds the type-specific analysis prompt for a document.
pub fn build_analysis_prompt(doc_type: DocumentType, text: &str) -> String {
    let sample: String = text.chars().take(text_budget(doc_type)).collect();

    let body = match doc_type {
        DocumentType::Resume => RESUME_ANALYSIS_TEMPLATE.replace("{text}", &sample),
        DocumentType::MeetingNotes => MEETING_ANALYSIS_TEMPLATE.replace("{text}", &sample),
        DocumentType::Legal => LEGAL_ANALYSIS_TEMPLATE.replace("{text}", &sample),
        DocumentType::Research => RESEARCH_ANALYSIS_TEMPLATE.replace("{text}", &sample),
        DocumentType::Report | DocumentType::Other => GENERIC_ANALYSIS_TEMPLATE
            .replace("{doc_label}", doc_type.label())
            .replace("{text}", &sample),
    };

    format!("{JSON_ONLY_HEADER}{body}")
}

/// Generates a summary and action items for a classified document.
pub async fn analyze_document(
    text: &str,
    doc_type: DocumentType,
    llm: &LlmClient,
) -> Result<AnalysisOutcome, AppError> {
    let prompt = build_analysis_prompt(doc_type, text);

    llm.call_json::<AnalysisOutcome>(
        &prompt,
        CallOptions {
            temperature: 0.4,
            max_output_tokens: 2000,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Document analysis failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_prompt_uses_resume_template() {
        let prompt = build_analysis_prompt(DocumentType::Resume, "some resume text");
        assert!(prompt.contains("RESUME/CV"));
        assert!(prompt.contains("some resume text"));
    }

    #[test]
    fn test_generic_prompt_carries_type_label() {
        let prompt = build_analysis_prompt(DocumentType::Report, "quarterly numbers");
        assert!(prompt.contains("Business Report"));
        assert!(!prompt.contains("{doc_label}"));
    }

    #[test]
    fn test_prompt_truncates_to_budget() {
        let text = "a".repeat(10_000);
        let prompt = build_analysis_prompt(DocumentType::Resume, &text);
        // 2500-char budget for resumes
        assert!(prompt.contains(&"a".repeat(2500)));
        assert!(!prompt.contains(&"a".repeat(2501)));
    }

    #[test]
    fn test_legal_budget_is_larger() {
        assert!(text_budget(DocumentType::Legal) > text_budget(DocumentType::Resume));
    }

    #[test]
    fn test_every_prompt_demands_json() {
        for ty in [
            DocumentType::Resume,
            DocumentType::MeetingNotes,
            DocumentType::Legal,
            DocumentType::Research,
            DocumentType::Report,
            DocumentType::Other,
        ] {
            let prompt = build_analysis_prompt(ty, "text");
            assert!(prompt.contains("valid JSON only"), "{ty:?} prompt lacks JSON header");
            assert!(!prompt.contains("{text}"), "{ty:?} prompt has unfilled placeholder");
        }
    }

    #[test]
    fn test_outcome_tolerates_missing_action_items() {
        let outcome: AnalysisOutcome =
            serde_json::from_str(r#"{"summary": "just a summary"}"#).unwrap();
        assert!(outcome.action_items.is_empty());
    }

    #[test]
    fn test_outcome_roundtrip() {
        let json = r#"{"summary": "s", "action_items": ["a", "b"]}"#;
        let outcome: AnalysisOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.action_items.len(), 2);
    }
}
