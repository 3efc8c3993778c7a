//! Suggested follow-up questions for a stored document.

use crate::analysis::prompts::QUESTIONS_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_HEADER;
use crate::llm_client::{CallOptions, LlmClient};

/// Characters of document text the questions prompt carries.
const QUESTIONS_SAMPLE_CHARS: usize = 1500;
/// Hard cap on suggestions returned, whatever the model produces.
const MAX_QUESTIONS: usize = 7;

/// Generates up to seven suggested questions about a document.
pub async fn suggest_questions(text: &str, llm: &LlmClient) -> Result<Vec<String>, AppError> {
    let sample: String = text.chars().take(QUESTIONS_SAMPLE_CHARS).collect();
    let prompt = format!(
        "{JSON_ONLY_HEADER}{}",
        QUESTIONS_PROMPT_TEMPLATE.replace("{text}", &sample)
    );

    let questions: Vec<String> = llm
        .call_json(
            &prompt,
            CallOptions {
                temperature: 0.6,
                max_output_tokens: 500,
            },
        )
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    Ok(tidy_questions(questions))
}

/// Drops empty entries and caps the list at [`MAX_QUESTIONS`].
fn tidy_questions(questions: Vec<String>) -> Vec<String> {
    questions
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .take(MAX_QUESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_caps_at_seven() {
        let many: Vec<String> = (0..12).map(|i| format!("Question {i}?")).collect();
        assert_eq!(tidy_questions(many).len(), 7);
    }

    #[test]
    fn test_tidy_drops_blank_entries() {
        let questions = vec![
            "  What is the deadline?  ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "Who owns the action items?".to_string(),
        ];
        let tidied = tidy_questions(questions);
        assert_eq!(tidied.len(), 2);
        assert_eq!(tidied[0], "What is the deadline?");
    }

    #[test]
    fn test_tidy_empty_input() {
        assert!(tidy_questions(vec![]).is_empty());
    }
}
