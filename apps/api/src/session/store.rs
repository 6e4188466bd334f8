use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::AppError;
use crate::session::SessionState;

const REDIS_KEY_PREFIX: &str = "tailor:session:";

/// Storage backend for session state. Every save restarts the session's TTL.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: &str) -> Result<Option<SessionState>, AppError>;
    async fn save(&self, token: &str, state: &SessionState) -> Result<(), AppError>;
    async fn remove(&self, token: &str) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

/// Sessions as JSON strings under `tailor:session:<token>` with `EX` expiry.
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisSessionStore {
    pub async fn connect(client: &redis::Client, ttl: Duration) -> redis::RedisResult<Self> {
        let conn = client.get_multiplexed_tokio_connection().await?;
        Ok(Self { conn, ttl })
    }

    fn key(token: &str) -> String {
        format!("{REDIS_KEY_PREFIX}{token}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, token: &str) -> Result<Option<SessionState>, AppError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(Self::key(token))
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("GET failed: {e}")))?;

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(state) => Ok(Some(state)),
                Err(e) => {
                    // Unreadable sessions (e.g. from an older build) are treated as logged out.
                    debug!("Discarding undecodable session: {e}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn save(&self, token: &str, state: &SessionState) -> Result<(), AppError> {
        let json = serde_json::to_string(state)
            .map_err(|e| AppError::Session(format!("serialize failed: {e}")))?;
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(Self::key(token))
            .arg(json)
            .arg("EX")
            .arg(self.ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("SET failed: {e}")))
    }

    async fn remove(&self, token: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(Self::key(token))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("DEL failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-process memory
// ────────────────────────────────────────────────────────────────────────────

/// Sessions held in this process only. Used when no `REDIS_URL` is configured.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, (SessionState, Instant)>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, token: &str) -> Result<Option<SessionState>, AppError> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some((state, expires_at)) if *expires_at > now => return Ok(Some(state.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        self.sessions.write().await.remove(token);
        Ok(None)
    }

    async fn save(&self, token: &str, state: &SessionState) -> Result<(), AppError> {
        let expires_at = Instant::now() + self.ttl;
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, (_, exp)| *exp > Instant::now());
        sessions.insert(token.to_string(), (state.clone(), expires_at));
        Ok(())
    }

    async fn remove(&self, token: &str) -> Result<(), AppError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
