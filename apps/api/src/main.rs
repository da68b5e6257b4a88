mod campaigns;
mod config;
mod contracts;
mod creators;
mod db;
mod deals;
mod errors;
mod llm_client;
mod media;
mod models;
mod negotiations;
mod outreach;
mod ranking;
mod routes;
mod state;
mod tts;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::media::MediaStore;
use crate::ranking::{CreatorRanker, KeywordRanker, OracleRanker, RankingBackend};
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::tts::ElevenLabsClient;

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

    info!("Starting CreatorFlow API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.openai_model.clone(),
        config.llm_timeout_secs,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize TTS client
    let tts = ElevenLabsClient::new(config.elevenlabs_api_key.clone(), &config.elevenlabs_base_url)?;

    // Creator ranking: model scoring with keyword fallback, or keywords only
    let ranker: Arc<dyn CreatorRanker> = match config.ranking_backend {
        RankingBackend::Oracle => Arc::new(OracleRanker::new(Arc::new(llm.clone()))),
        RankingBackend::Keyword => Arc::new(KeywordRanker),
    };
    info!("Creator ranking backend: {:?}", config.ranking_backend);

    // Local media directories for audio and contracts
    let media = MediaStore::new(config.media_dir.clone());
    media.ensure_dirs().await?;
    info!("Media directory: {}", config.media_dir.display());

    let state = AppState {
        db,
        llm: Arc::new(llm),
        ranker,
        tts: Arc::new(tts),
        media,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
