use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Minimum length of `SECRET_KEY`; the cookie signing key is derived from it.
const MIN_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Absent → sessions are held in process memory.
    pub redis_url: Option<String>,
    pub secret_key: String,
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    pub font_path: PathBuf,
    pub export_dir: PathBuf,
    pub session_ttl_secs: u64,
    pub draft_ttl_secs: u64,
    pub rewrite_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let secret_key = require_env("SECRET_KEY")?;
        if secret_key.len() < MIN_SECRET_LEN {
            bail!("SECRET_KEY must be at least {MIN_SECRET_LEN} bytes long");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            secret_key,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_API_BASE.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            font_path: std::env::var("FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("fonts/DejaVuSans.ttf")),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir().join("tailor-exports")),
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 86_400)?,
            draft_ttl_secs: parse_env("DRAFT_TTL_SECS", 7_200)?,
            rewrite_timeout_secs: parse_env("REWRITE_TIMEOUT_SECS", 60)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("TAILOR_TEST_UNSET_NUMBER", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("TAILOR_TEST_BAD_NUMBER", "forty-two");
        let result: Result<u64> = parse_env("TAILOR_TEST_BAD_NUMBER", 1);
        assert!(result.is_err());
        std::env::remove_var("TAILOR_TEST_BAD_NUMBER");
    }

    #[test]
    fn test_parse_env_trims_whitespace() {
        std::env::set_var("TAILOR_TEST_PADDED_NUMBER", " 9000 ");
        let value: u16 = parse_env("TAILOR_TEST_PADDED_NUMBER", 1).unwrap();
        assert_eq!(value, 9000);
        std::env::remove_var("TAILOR_TEST_PADDED_NUMBER");
    }
}
