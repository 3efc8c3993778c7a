// Shared prompt fragments. Each analysis task defines its own templates in
// analysis::prompts; this file carries only cross-cutting pieces.

/// Prompt fragment that enforces JSON-only output. Prepended to every prompt
/// consumed through `call_json`.
pub const JSON_ONLY_HEADER: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.\n\n";

/// Instruction that keeps answers grounded in the retrieved context.
pub const CONTEXT_ONLY_INSTRUCTION: &str = "\
    Use ONLY the information provided in the context above. \
    If the context does not contain enough information to answer the question, say so. \
    Do not provide a document summary unless specifically asked. \
    Be concise and focused on the user's question.";
