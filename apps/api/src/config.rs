use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::ranking::RankingBackend;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    pub elevenlabs_api_key: String,
    pub elevenlabs_base_url: String,
    /// Root directory for generated audio and contract files.
    pub media_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    /// Which creator ranker serves search requests.
    pub ranking_backend: RankingBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "60")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            elevenlabs_api_key: require_env("ELEVENLABS_API_KEY")?,
            elevenlabs_base_url: env_or("ELEVENLABS_BASE_URL", DEFAULT_ELEVENLABS_BASE_URL),
            media_dir: PathBuf::from(env_or("MEDIA_DIR", "static")),
            allowed_origins: parse_origins(&env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
            ranking_backend: env_or("RANKING_BACKEND", "oracle")
                .parse::<RankingBackend>()
                .map_err(|e| anyhow!(e))
                .context("RANKING_BACKEND must be 'oracle' or 'keyword'")?,
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
