pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/", get(auth::handle_home))
        .route("/signup", get(auth::handle_signup_form).post(auth::handle_signup))
        .route("/login", get(auth::handle_login_form).post(auth::handle_login))
        .route("/logout", get(auth::handle_logout))
        // Rewrite
        .route(
            "/index",
            get(generation::handle_index).post(generation::handle_index_submit),
        )
        .route("/dashboard", get(generation::handle_dashboard))
        // Export
        .route("/finalize", post(export::handle_finalize))
        .route("/download-options", get(export::handle_download_options))
        .route("/download/docx", get(export::handle_download_docx))
        .route("/download/pdf", get(export::handle_download_pdf))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
