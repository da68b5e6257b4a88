//! Creator Ranking: pluggable, trait-based ranking of creators against a campaign.
//!
//! `OracleRanker` asks the language model to score every creator in one call and
//! falls back to `KeywordRanker` (pure-Rust, deterministic) whenever the model
//! fails or answers with something unparsable. The fallback is all-or-nothing.
//!
//! `AppState` holds an `Arc<dyn CreatorRanker>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::campaign::Campaign;
use crate::models::creator::Creator;

pub mod keyword;
pub mod oracle;
pub mod prompts;

pub use keyword::KeywordRanker;
pub use oracle::OracleRanker;

/// Upper bound for any match score.
pub const MAX_MATCH_SCORE: u8 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all ranker backends)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationFit {
    Poor,
    #[default]
    Fair,
    Good,
    Excellent,
}

impl CollaborationFit {
    /// Case-insensitive label parse; anything unrecognised is `Fair`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("poor") => Self::Poor,
            Some("good") => Self::Good,
            Some("excellent") => Self::Excellent,
            _ => Self::Fair,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPotential {
    Low,
    #[default]
    Medium,
    High,
}

impl GrowthPotential {
    /// Case-insensitive label parse; anything unrecognised is `Medium`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("low") => Self::Low,
            Some("high") => Self::High,
            _ => Self::Medium,
        }
    }
}

/// Qualitative read on a creator, only available from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsights {
    pub strengths: Vec<String>,
    pub collaboration_fit: CollaborationFit,
    pub growth_potential: GrowthPotential,
    pub optimal_content_types: Vec<String>,
}

/// A creator with its match score. Serializes flat: creator fields + score + insights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCreator {
    #[serde(flatten)]
    pub creator: Creator,
    /// Always within 0..=100.
    pub match_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingBackend {
    Oracle,
    Keyword,
}

impl std::str::FromStr for RankingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oracle" => Ok(RankingBackend::Oracle),
            "keyword" => Ok(RankingBackend::Keyword),
            other => Err(format!("unknown ranking backend '{other}' (expected oracle or keyword)")),
        }
    }
}

/// Ranked creators (best first) plus keywords describing the query intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    pub results: Vec<RankedCreator>,
    pub semantic_matches: Vec<String>,
    /// Which backend produced this result, for logging and transparency.
    pub backend: RankingBackend,
}

impl RankingResult {
    pub fn empty(backend: RankingBackend) -> Self {
        Self {
            results: Vec::new(),
            semantic_matches: Vec::new(),
            backend,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Ranks a creator roster for a campaign. Implementations never fail: the worst
/// case is an empty result.
#[async_trait]
pub trait CreatorRanker: Send + Sync {
    async fn rank(&self, campaign: &Campaign, query: &str, creators: &[Creator]) -> RankingResult;
}

/// Stable descending sort by score; equal scores keep roster order.
pub(crate) fn sort_best_first(ranked: &mut [RankedCreator]) {
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}
