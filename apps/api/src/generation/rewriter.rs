//! Resume rewriting: the trait seam between the pipeline and the remote model.
//!
//! `AppState` holds an `Arc<dyn ResumeRewriter>`; production wires `LlmRewriter`.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::build_rewrite_prompt;
use crate::llm_client::{LlmClient, MODEL};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Produces a rewritten resume tailored to a job description.
///
/// Failures of the remote service surface as `AppError::RewriteService`.
#[async_trait]
pub trait ResumeRewriter: Send + Sync {
    async fn rewrite(&self, resume_text: &str, job_description: &str)
        -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmRewriter (Gemini)
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmRewriter(pub LlmClient);

#[async_trait]
impl ResumeRewriter for LlmRewriter {
    async fn rewrite(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String, AppError> {
        let prompt = build_rewrite_prompt(resume_text, job_description);
        info!(
            "Requesting rewrite from {MODEL} ({} prompt chars)",
            prompt.chars().count()
        );

        self.0
            .call_text(&prompt)
            .await
            .map_err(|e| AppError::RewriteService(format!("Resume rewrite failed: {e}")))
    }
}
