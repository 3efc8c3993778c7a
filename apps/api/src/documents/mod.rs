// Document lifecycle: upload pipeline, listing, detail, removal, re-analysis.
// Orchestrates extraction → analysis → memory; owns no state of its own.

pub mod handlers;
pub mod pipeline;
