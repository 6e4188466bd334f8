use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::PgPool;

use crate::config::Config;
use crate::generation::rewriter::ResumeRewriter;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis-backed in production; in-process when no REDIS_URL is set.
    pub sessions: Arc<dyn SessionStore>,
    /// Pluggable rewriter. Default: LlmRewriter over the Gemini client.
    pub rewriter: Arc<dyn ResumeRewriter>,
    pub config: Config,
    /// Signs the session cookie. Derived from SECRET_KEY.
    pub cookie_key: Key,
    /// Raw bytes of the Unicode TrueType font used for PDF export, validated at startup.
    pub pdf_font: Arc<Vec<u8>>,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Stretches the configured secret to the 64 bytes a cookie `Key` needs.
pub fn cookie_key_from_secret(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

    #[test]
    fn test_same_secret_verifies_signed_cookie() {
        let secret = "a-very-long-session-signing-secret-for-tests";
        let jar = SignedCookieJar::new(cookie_key_from_secret(secret))
            .add(Cookie::new("sid", "token"));
        let signed = jar.get("sid").unwrap();
        assert_eq!(signed.value(), "token");
    }

    #[test]
    fn test_different_secrets_give_different_keys() {
        let a = cookie_key_from_secret("secret-number-one-secret-number-one");
        let b = cookie_key_from_secret("secret-number-two-secret-number-two");
        assert_ne!(a.master(), b.master());
    }
}
