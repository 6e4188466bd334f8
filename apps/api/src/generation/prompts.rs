// LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;

/// Resume rewrite prompt. Replace `{resume_text}` and `{job_description}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = "\
Rewrite the following resume to better match the job description below.
Keep it professional, ATS-friendly, and tailored to the role.

Resume:
{resume_text}

Job Description:
{job_description}
";

/// Builds the rewrite prompt with both texts embedded verbatim.
pub fn build_rewrite_prompt(resume_text: &str, job_description: &str) -> String {
    // Substitute the job description first so a resume containing the literal
    // `{job_description}` is never expanded.
    let prompt = REWRITE_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replacen("{resume_text}", resume_text, 1);
    format!("{prompt}\n{PLAIN_TEXT_INSTRUCTION}")
}
