use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::templates::ErrorPage;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    Authentication,

    /// No live session on a protected route. Never shown; the user is sent to /login.
    #[error("Authentication required")]
    Authorization,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("An account with that email already exists")]
    EmailTaken,

    #[error("Extraction failure: {0}")]
    Extraction(String),

    #[error("Rewrite service error: {0}")]
    RewriteService(String),

    #[error("Export write failure: {0}")]
    ExportWrite(String),

    #[error("Nothing to download yet")]
    DownloadNotFound,

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status code and the message safe to show to the user.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Authentication => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Authorization => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::EmailTaken => (StatusCode::CONFLICT, self.to_string()),
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction failure: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "We could not read any text from that PDF. Please upload a text-based PDF."
                        .to_string(),
                )
            }
            AppError::RewriteService(msg) => {
                tracing::error!("Rewrite service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The rewrite service is unavailable right now. Please try again.".to_string(),
                )
            }
            AppError::ExportWrite(msg) => {
                tracing::error!("Export write failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Your resume could not be exported. Please try again.".to_string(),
                )
            }
            AppError::DownloadNotFound => (
                StatusCode::NOT_FOUND,
                "Nothing to download yet. Finalize your resume first.".to_string(),
            ),
            AppError::Session(msg) => {
                tracing::error!("Session store error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A session error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Authorization) {
            return Redirect::to("/login").into_response();
        }

        let (status, message) = self.status_and_message();
        let page = ErrorPage {
            status: status.as_u16(),
            message: &message,
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_authorization_redirects_to_login() {
        let response = AppError::Authorization.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[test]
    fn test_download_not_found_is_404() {
        let response = AppError::DownloadNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_input_keeps_message() {
        let (status, message) =
            AppError::InvalidInput("Job description is empty".to_string()).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Job description is empty");
    }

    #[test]
    fn test_rewrite_failure_hides_provider_detail() {
        let (status, message) =
            AppError::RewriteService("API error (status 500): boom".to_string())
                .status_and_message();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!message.contains("boom"));
    }
}
