//! ATS compatibility scoring for resumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::prompts::{ATS_NO_JD, ATS_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_HEADER;
use crate::llm_client::{CallOptions, LlmClient};

/// ATS compatibility report: an integer 0–100 score plus per-criterion
/// feedback. Transient — produced per request, never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32,
    /// Criterion name → feedback sentence. BTreeMap keeps output ordering stable.
    pub criteria: BTreeMap<String, String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
}

/// Builds the ATS scoring prompt for a resume and optional job description.
pub fn build_ats_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let jd = match job_description {
        Some(jd) if !jd.trim().is_empty() => jd,
        _ => ATS_NO_JD,
    };

    format!(
        "{JSON_ONLY_HEADER}{}",
        ATS_PROMPT_TEMPLATE
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", jd)
    )
}

/// Scores a resume for ATS compatibility.
///
/// The model is told to return 0–100; a runaway value is clamped rather than
/// failing the request, since the rest of the report is still usable.
pub async fn analyze_ats_score(
    resume_text: &str,
    job_description: Option<&str>,
    llm: &LlmClient,
) -> Result<AtsReport, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is empty".to_string()));
    }

    let prompt = build_ats_prompt(resume_text, job_description);

    let mut report: AtsReport = llm
        .call_json(
            &prompt,
            CallOptions {
                temperature: 0.3,
                max_output_tokens: 2000,
            },
        )
        .await
        .map_err(|e| AppError::Llm(format!("ATS analysis failed: {e}")))?;

    if report.score > 100 {
        warn!("ATS score {} out of range, clamping to 100", report.score);
        report.score = 100;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_and_jd() {
        let prompt = build_ats_prompt("Jane Doe, Rust engineer", Some("Senior Rust role"));
        assert!(prompt.contains("Jane Doe, Rust engineer"));
        assert!(prompt.contains("Senior Rust role"));
    }

    #[test]
    fn test_prompt_without_jd_uses_placeholder() {
        let prompt = build_ats_prompt("resume", None);
        assert!(prompt.contains(ATS_NO_JD));
    }

    #[test]
    fn test_blank_jd_treated_as_missing() {
        let prompt = build_ats_prompt("resume", Some("   "));
        assert!(prompt.contains(ATS_NO_JD));
    }

    #[test]
    fn test_report_deserializes_from_model_output() {
        let json = r#"{
            "score": 72,
            "criteria": {
                "contact_information": "Complete and well formatted",
                "keywords_and_skills": "Missing cloud keywords"
            },
            "recommendations": ["Add AWS and Kubernetes keywords"],
            "strengths": ["Clear section headers"]
        }"#;
        let report: AtsReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.score, 72);
        assert_eq!(report.criteria.len(), 2);
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn test_report_tolerates_missing_optional_lists() {
        let json = r#"{"score": 50, "criteria": {}}"#;
        let report: AtsReport = serde_json::from_str(json).unwrap();
        assert!(report.recommendations.is_empty());
        assert!(report.strengths.is_empty());
    }
}
