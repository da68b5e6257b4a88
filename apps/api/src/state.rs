use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::LanguageModel;
use crate::media::MediaStore;
use crate::ranking::CreatorRanker;
use crate::tts::SpeechSynthesizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Chat model behind brief, outreach and negotiation content.
    pub llm: Arc<dyn LanguageModel>,
    /// Creator ranking. Default: `OracleRanker` with keyword fallback.
    pub ranker: Arc<dyn CreatorRanker>,
    pub tts: Arc<dyn SpeechSynthesizer>,
    pub media: MediaStore,
}
