//! Rewrite pipeline. Turns an uploaded resume and a job description into a tailored draft.
//!
//! Flow: extract text → score against JD → rewrite via LLM → persist record.
//!
//! Scoring runs before the rewrite so an unusable job description is rejected
//! without spending a remote call.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::extraction::extract_resume_text;
use crate::generation::history::{insert_transformation, NewTransformation};
use crate::generation::match_scoring::{score_match, MatchReport};
use crate::generation::rewriter::ResumeRewriter;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A resume upload as received from the form.
pub struct TransformRequest {
    pub account_id: Uuid,
    pub resume_pdf: Vec<u8>,
    pub job_description: String,
}

/// Output of a successful rewrite, before persistence.
#[derive(Debug, Clone)]
pub struct Transformation {
    pub original_text: String,
    pub transformed_text: String,
    pub report: MatchReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text` against `job_description` and asks the rewriter for a tailored version.
pub async fn transform_text(
    rewriter: &dyn ResumeRewriter,
    resume_text: String,
    job_description: &str,
) -> Result<Transformation, AppError> {
    let report = score_match(&resume_text, job_description)?;
    info!(
        "Match score {:.2} ({}/{} keywords)",
        report.score, report.matched_count, report.keyword_count
    );

    let transformed_text = rewriter.rewrite(&resume_text, job_description).await?;
    let transformed_text = transformed_text.trim().to_string();
    if transformed_text.is_empty() {
        return Err(AppError::RewriteService(
            "rewriter returned an empty resume".to_string(),
        ));
    }

    Ok(Transformation {
        original_text: resume_text,
        transformed_text,
        report,
    })
}

/// Runs the full pipeline for one upload and records the result in the account's history.
///
/// Nothing is persisted unless extraction, scoring and rewrite all succeed.
pub async fn run_transformation(
    pool: &PgPool,
    rewriter: &dyn ResumeRewriter,
    request: TransformRequest,
) -> Result<Transformation, AppError> {
    let TransformRequest {
        account_id,
        resume_pdf,
        job_description,
    } = request;

    if job_description.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Please paste a job description.".to_string(),
        ));
    }

    let resume_text = extract_resume_text(resume_pdf).await?;
    let transformation = transform_text(rewriter, resume_text, &job_description).await?;

    let record_id = insert_transformation(
        pool,
        NewTransformation {
            account_id,
            original_text: &transformation.original_text,
            transformed_text: &transformation.transformed_text,
            job_description: &job_description,
            score: transformation.report.score,
        },
    )
    .await?;

    info!("Recorded transformation {record_id} for account {account_id}");
    Ok(transformation)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
