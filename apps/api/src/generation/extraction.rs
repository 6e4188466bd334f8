//! PDF text extraction for uploaded resumes.
//!
//! Thin adapter over `pdf-extract`. Parsing is CPU-bound and the library may panic on
//! malformed input, so it runs on the blocking pool and a panic becomes an extraction error.

use tracing::{debug, info};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts the text of every page of `pdf_bytes`.
///
/// Pages without extractable text are skipped; each kept page is followed by a newline.
pub async fn extract_resume_text(pdf_bytes: Vec<u8>) -> Result<String, AppError> {
    validate_upload(&pdf_bytes)?;

    let size = pdf_bytes.len();
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&pdf_bytes)
    })
    .await
    .map_err(|e| AppError::Extraction(format!("PDF parser aborted: {e}")))?
    .map_err(|e| AppError::Extraction(format!("PDF parsing failed: {e}")))?;

    let page_count = pages.len();
    let text = join_pages(pages);
    if text.trim().is_empty() {
        return Err(AppError::Extraction(format!(
            "no extractable text in {page_count} page(s)"
        )));
    }

    info!("Extracted {} chars from {page_count} page(s) ({size} bytes)", text.len());
    Ok(text)
}

/// Rejects uploads that cannot be a PDF before handing them to the parser.
fn validate_upload(bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::InvalidInput(
            "Please choose a resume PDF to upload.".to_string(),
        ));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::InvalidInput(
            "The uploaded file is not a PDF.".to_string(),
        ));
    }
    Ok(())
}

fn join_pages(pages: Vec<String>) -> String {
    let mut text = String::new();
    for (index, page) in pages.into_iter().enumerate() {
        if page.trim().is_empty() {
            debug!("Page {} has no extractable text, skipping", index + 1);
            continue;
        }
        text.push_str(&page);
        text.push('\n');
    }
    text
}
