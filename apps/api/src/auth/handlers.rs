//! Axum route handlers for signup, login and logout.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::accounts::{authenticate, create_account, NewAccount};
use crate::errors::AppError;
use crate::session::{end_session, session_cookie, SessionState, SESSION_COOKIE};
use crate::state::AppState;
use crate::templates::{render, LoginPage, SignupPage};

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// GET /
pub async fn handle_home() -> Redirect {
    Redirect::to("/signup")
}

/// GET /signup
pub async fn handle_signup_form() -> Result<Response, AppError> {
    Ok(render(&SignupPage {
        error: None,
        name: "",
        email: "",
    })?
    .into_response())
}

/// POST /signup
///
/// Input problems and duplicate emails re-render the form with the message.
pub async fn handle_signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let outcome = match NewAccount::parse(&form.name, &form.email, &form.password) {
        Ok(new) => create_account(&state.db, new).await.map(|_| ()),
        Err(e) => Err(e),
    };

    let (status, message) = match outcome {
        Ok(()) => return Ok(Redirect::to("/login").into_response()),
        Err(AppError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
        Err(AppError::EmailTaken) => (StatusCode::CONFLICT, AppError::EmailTaken.to_string()),
        Err(e) => return Err(e),
    };

    let page = render(&SignupPage {
        error: Some(&message),
        name: &form.name,
        email: &form.email,
    })?;
    Ok((status, page).into_response())
}

/// GET /login
pub async fn handle_login_form() -> Result<Response, AppError> {
    Ok(render(&LoginPage { error: None })?.into_response())
}

/// POST /login
///
/// Bad credentials re-render the form inline; success opens a session and
/// sends the user to the upload page.
pub async fn handle_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let account = match authenticate(&state.db, &form.email, &form.password).await {
        Ok(account) => account,
        Err(AppError::Authentication) => {
            warn!("Failed login attempt");
            let page = render(&LoginPage {
                error: Some("Invalid credentials"),
            })?;
            return Ok((StatusCode::UNAUTHORIZED, page).into_response());
        }
        Err(e) => return Err(e),
    };

    // logging in over a live session replaces it
    if let Some(previous) = jar.get(SESSION_COOKIE) {
        end_session(state.sessions.as_ref(), previous.value()).await?;
    }

    let token = Uuid::new_v4().simple().to_string();
    state
        .sessions
        .save(&token, &SessionState::new(account.id, account.name))
        .await?;
    info!("Account {} logged in", account.id);

    Ok((jar.add(session_cookie(token)), Redirect::to("/index")).into_response())
}

/// GET /logout
///
/// Destroys the session and any export artifact still waiting for download.
pub async fn handle_logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(session) = end_session(state.sessions.as_ref(), cookie.value()).await? {
            info!("Account {} logged out", session.account_id);
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Redirect::to("/login")).into_response())
}
