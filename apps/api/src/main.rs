mod auth;
mod config;
mod db;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod templates;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::export::artifacts::spawn_artifact_sweeper;
use crate::export::pdf::load_font;
use crate::generation::rewriter::LlmRewriter;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::{cookie_key_from_secret, AppState};

const ARTIFACT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize session store
    let session_ttl = Duration::from_secs(config.session_ttl_secs);
    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            let store = RedisSessionStore::connect(&client, session_ttl)
                .await
                .context("connecting to Redis")?;
            info!("Redis session store initialized");
            Arc::new(store)
        }
        None => {
            warn!("REDIS_URL not set; sessions are kept in process memory");
            Arc::new(MemorySessionStore::new(session_ttl))
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
        Duration::from_secs(config.rewrite_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // PDF font: fail at startup rather than on the first download
    let pdf_font = std::fs::read(&config.font_path)
        .with_context(|| format!("reading font {}", config.font_path.display()))?;
    load_font(&pdf_font)?;
    info!("PDF font loaded from {}", config.font_path.display());

    // Export directory; artifacts outliving their session are swept periodically
    std::fs::create_dir_all(&config.export_dir)
        .with_context(|| format!("creating {}", config.export_dir.display()))?;
    spawn_artifact_sweeper(
        config.export_dir.clone(),
        session_ttl,
        ARTIFACT_SWEEP_INTERVAL.min(session_ttl).max(Duration::from_secs(1)),
    );
    info!("Export artifacts in {}", config.export_dir.display());

    let state = AppState {
        db,
        sessions,
        rewriter: Arc::new(LlmRewriter(llm)),
        cookie_key: cookie_key_from_secret(&config.secret_key),
        pdf_font: Arc::new(pdf_font),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
