// Resume rewrite engine.
// Implements: PDF text extraction, keyword match scoring, LLM rewrite, history.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod extraction;
pub mod handlers;
pub mod history;
pub mod match_scoring;
pub mod pipeline;
pub mod prompts;
pub mod rewriter;
