use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::errors::AppError;
use crate::session::SessionState;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "tailor_session";

/// The live session of the requesting browser.
///
/// Extracting it on a route makes the route protected: a missing, forged or expired
/// session rejects with `AppError::Authorization`, which redirects to /login.
pub struct CurrentSession {
    pub token: String,
    pub state: SessionState,
}

impl CurrentSession {
    pub async fn save(&self, app: &AppState) -> Result<(), AppError> {
        app.sessions.save(&self.token, &self.state).await
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, app: &AppState) -> Result<Self, AppError> {
        let jar = SignedCookieJar::from_headers(&parts.headers, app.cookie_key.clone());
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Authorization)?;

        let state = app
            .sessions
            .load(&token)
            .await?
            .ok_or(AppError::Authorization)?;

        Ok(Self { token, state })
    }
}

/// The cookie carrying a session token. Signed by the jar it is added to.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
