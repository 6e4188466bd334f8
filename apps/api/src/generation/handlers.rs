//! Axum route handlers for the upload → rewrite flow and the history dashboard.

use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::history::list_transformations;
use crate::generation::pipeline::{run_transformation, TransformRequest};
use crate::session::{CurrentSession, Draft};
use crate::state::AppState;
use crate::templates::{render, DashboardPage, IndexPage, ResultView};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// Present → discard the pending draft and show a fresh upload form.
    pub new: Option<String>,
}

/// Fields of the upload form.
struct Upload {
    resume_pdf: Vec<u8>,
    job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /index
///
/// Shows the pending draft if one is still fresh, otherwise the upload form.
pub async fn handle_index(
    State(state): State<AppState>,
    mut session: CurrentSession,
    Query(query): Query<IndexQuery>,
) -> Result<Response, AppError> {
    if query.new.is_some() && session.state.draft.is_some() {
        session.state.draft = None;
        session.save(&state).await?;
    }

    let draft_ttl = Duration::seconds(state.config.draft_ttl_secs as i64);
    let draft = session.state.pending_draft(draft_ttl, Utc::now());

    Ok(render(&IndexPage {
        name: &session.state.account_name,
        result: draft.map(result_view),
    })?
    .into_response())
}

/// POST /index
///
/// Full pipeline: extract → score → rewrite → record, then shows the editable draft.
pub async fn handle_index_submit(
    State(state): State<AppState>,
    mut session: CurrentSession,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_upload(multipart).await?;

    let transformation = run_transformation(
        &state.db,
        state.rewriter.as_ref(),
        TransformRequest {
            account_id: session.state.account_id,
            resume_pdf: upload.resume_pdf,
            job_description: upload.job_description,
        },
    )
    .await?;

    session.state.draft = Some(Draft {
        transformed_text: transformation.transformed_text,
        score: transformation.report.score,
        missing_keywords: transformation.report.missing_keywords,
        created_at: Utc::now(),
    });
    session.save(&state).await?;

    Ok(render(&IndexPage {
        name: &session.state.account_name,
        result: session.state.draft.as_ref().map(result_view),
    })?
    .into_response())
}

/// GET /dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, AppError> {
    let records = list_transformations(&state.db, session.state.account_id).await?;

    Ok(render(&DashboardPage {
        name: &session.state.account_name,
        records: &records,
    })?
    .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn result_view(draft: &Draft) -> ResultView<'_> {
    ResultView {
        text: &draft.transformed_text,
        score: draft.score,
        missing_keywords: &draft.missing_keywords,
    }
}

/// Reads the `resume` file and `job_desc` text fields; other fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut resume_pdf = None;
    let mut job_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("The upload could not be read: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("The resume file could not be read: {e}"))
                })?;
                resume_pdf = Some(bytes.to_vec());
            }
            "job_desc" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("The job description could not be read: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    Ok(Upload {
        resume_pdf: resume_pdf.ok_or_else(|| {
            AppError::InvalidInput("Please choose a resume PDF to upload.".to_string())
        })?,
        job_description: job_description.ok_or_else(|| {
            AppError::InvalidInput("Please paste a job description.".to_string())
        })?,
    })
}
