// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it and pulls cross-cutting pieces from here.

/// Appended to prompts whose answer is shown to the user verbatim.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond with the rewritten resume only, as plain text. \
    Do NOT add commentary, explanations, or markdown code fences.";
