//! Memory-grounded question answering.

use crate::analysis::prompts::QA_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::CONTEXT_ONLY_INSTRUCTION;
use crate::llm_client::{CallOptions, LlmClient};
use crate::memory::store::SearchHit;

/// Builds the Q&A prompt from retrieved chunks and the user's question.
/// Chunks are separated by blank lines, each tagged with its source document.
pub fn build_qa_prompt(hits: &[SearchHit], question: &str) -> String {
    let context = hits
        .iter()
        .map(|hit| format!("[from {}]\n{}", hit.document_name, hit.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    QA_PROMPT_TEMPLATE
        .replace("{context}", &context)
        .replace("{question}", question)
        .replace("{instructions}", CONTEXT_ONLY_INSTRUCTION)
}

/// Answers a question against retrieved context. Plain-text output — this is
/// the one call that is shown to the user verbatim rather than parsed.
pub async fn answer_question(
    hits: &[SearchHit],
    question: &str,
    llm: &LlmClient,
) -> Result<String, AppError> {
    let prompt = build_qa_prompt(hits, question);

    llm.call_text(
        &prompt,
        CallOptions {
            temperature: 0.3,
            max_output_tokens: 1500,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Q&A call failed: {e}")))
}
