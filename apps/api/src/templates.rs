//! Server-rendered pages. Markup lives in `templates/`; askama escapes all interpolations.

use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::models::transformation::TransformationRecord;

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage<'a> {
    pub error: Option<&'a str>,
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage<'a> {
    pub error: Option<&'a str>,
}

/// A rewritten resume shown for editing, with its match score.
pub struct ResultView<'a> {
    pub text: &'a str,
    pub score: f64,
    pub missing_keywords: &'a [String],
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub name: &'a str,
    pub result: Option<ResultView<'a>>,
}

#[derive(Template)]
#[template(path = "download_options.html")]
pub struct DownloadOptionsPage {
    pub has_docx: bool,
    pub has_pdf: bool,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage<'a> {
    pub name: &'a str,
    pub records: &'a [TransformationRecord],
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub status: u16,
    pub message: &'a str,
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}
