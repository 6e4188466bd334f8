//! Server-side session state, keyed by an opaque token carried in a signed cookie.
//!
//! A session lives from login until logout or until the store's TTL lapses. The
//! rewritten resume awaiting edits is held as an explicit `Draft` with its own,
//! shorter lifetime.

pub mod extractor;
pub mod store;

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::artifacts::remove_artifact;

pub use extractor::{session_cookie, CurrentSession, SESSION_COOKIE};
pub use store::{MemorySessionStore, RedisSessionStore, SessionStore};

/// A rewritten resume waiting for the user to edit and finalize it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Draft {
    pub transformed_text: String,
    pub score: f64,
    pub missing_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Draft {
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at > ttl
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub account_id: Uuid,
    pub account_name: String,
    pub draft: Option<Draft>,
    /// Text submitted at finalize; source for the PDF download.
    pub final_text: Option<String>,
    /// `.docx` written at finalize and not yet downloaded.
    pub docx_artifact: Option<PathBuf>,
}

impl SessionState {
    pub fn new(account_id: Uuid, account_name: String) -> Self {
        Self {
            account_id,
            account_name,
            draft: None,
            final_text: None,
            docx_artifact: None,
        }
    }

    /// The current draft, unless it has outlived `ttl`.
    pub fn pending_draft(&self, ttl: Duration, now: DateTime<Utc>) -> Option<&Draft> {
        self.draft.as_ref().filter(|d| !d.is_expired(ttl, now))
    }

    /// Records the finalized text and its artifact, dropping the draft.
    /// Returns the artifact this one replaces, which the caller must delete.
    pub fn finalize(&mut self, final_text: String, artifact: PathBuf) -> Option<PathBuf> {
        self.draft = None;
        self.final_text = Some(final_text);
        self.docx_artifact.replace(artifact)
    }
}

/// Removes the session behind `token` together with its pending export artifact.
/// Returns the state that was removed, if the session was still live.
pub async fn end_session(
    sessions: &dyn SessionStore,
    token: &str,
) -> Result<Option<SessionState>, AppError> {
    let session = sessions.load(token).await?;
    if let Some(path) = session.as_ref().and_then(|s| s.docx_artifact.as_deref()) {
        remove_artifact(path).await;
    }
    sessions.remove(token).await?;
    Ok(session)
}
