// Analysis Client — every LLM-backed task: classification, summarization,
// suggested questions, memory Q&A, and ATS scoring.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod ats;
pub mod classifier;
pub mod handlers;
pub mod prompts;
pub mod qa;
pub mod questions;
pub mod summarize;
