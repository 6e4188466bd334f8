//! Axum route handlers for finalizing and downloading the edited resume.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::artifacts::{remove_artifact, take_artifact, write_docx_artifact};
use crate::export::docx::build_docx;
use crate::export::pdf::render_pdf;
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::templates::{render, DownloadOptionsPage};

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
pub struct FinalizeForm {
    #[serde(default)]
    pub final_text: String,
}

/// POST /finalize
///
/// Writes the edited text to a fresh `.docx` artifact and stashes the text for the PDF.
pub async fn handle_finalize(
    State(state): State<AppState>,
    mut session: CurrentSession,
    Form(form): Form<FinalizeForm>,
) -> Result<Response, AppError> {
    let export_dir = state.config.export_dir.clone();
    let final_text = form.final_text;
    let text_for_docx = final_text.clone();

    let artifact = tokio::task::spawn_blocking(move || {
        let bytes = build_docx(&text_for_docx)?;
        write_docx_artifact(&export_dir, &bytes)
    })
    .await
    .map_err(|e| AppError::ExportWrite(format!("docx task failed: {e}")))??;

    let replaced = session.state.finalize(final_text, artifact.clone());
    if let Err(e) = session.save(&state).await {
        remove_artifact(&artifact).await;
        return Err(e);
    }
    if let Some(old) = replaced {
        remove_artifact(&old).await;
    }

    info!(
        "Finalized resume for account {} → {}",
        session.state.account_id,
        artifact.display()
    );
    Ok(Redirect::to("/download-options").into_response())
}

/// GET /download-options
pub async fn handle_download_options(session: CurrentSession) -> Result<Response, AppError> {
    Ok(render(&DownloadOptionsPage {
        has_docx: session.state.docx_artifact.is_some(),
        has_pdf: session.state.final_text.is_some(),
    })?
    .into_response())
}

/// GET /download/docx
///
/// Streams the artifact written at finalize, then deletes it.
pub async fn handle_download_docx(
    State(state): State<AppState>,
    mut session: CurrentSession,
) -> Result<Response, AppError> {
    let path = session
        .state
        .docx_artifact
        .take()
        .ok_or(AppError::DownloadNotFound)?;

    let result = take_artifact(&path).await;
    if matches!(result, Err(AppError::ExportWrite(_))) {
        // still on disk; keep it reachable for a retry, logout or re-finalize
        session.state.docx_artifact = Some(path);
    }
    session.save(&state).await?;
    let bytes = result?;

    Ok(attachment(bytes, DOCX_CONTENT_TYPE, "final_resume.docx"))
}

/// GET /download/pdf
///
/// Renders the finalized text to a PDF in memory.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, AppError> {
    let final_text = session
        .state
        .final_text
        .ok_or(AppError::DownloadNotFound)?;

    let font = state.pdf_font.clone();
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&final_text, &font))
        .await
        .map_err(|e| AppError::ExportWrite(format!("PDF task failed: {e}")))??;

    Ok(attachment(bytes, PDF_CONTENT_TYPE, "final_resume.pdf"))
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    (
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
