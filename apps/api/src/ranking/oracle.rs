//! Oracle-backed ranker: one model call scores the whole roster.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::llm_client::{complete_json, CompletionRequest, LlmClient, LlmError};
use crate::models::campaign::Campaign;
use crate::models::creator::Creator;
use crate::ranking::keyword::rank_by_keywords;
use crate::ranking::prompts::{build_scoring_prompt, scoring_system};
use crate::ranking::{
    sort_best_first, AiInsights, CollaborationFit, CreatorRanker, GrowthPotential, RankedCreator,
    RankingBackend, RankingResult, MAX_MATCH_SCORE,
};

/// Score used when the model gives neither a total nor a breakdown.
const DEFAULT_MATCH_SCORE: f64 = 50.0;
const RISK_PENALTY: f64 = 3.0;
const MAX_SEMANTIC_MATCHES: usize = 7;

// ────────────────────────────────────────────────────────────────────────────
// Oracle response schema
// ────────────────────────────────────────────────────────────────────────────

/// Parsed scoring response. `creator_scores` is required: an answer without it
/// is a parse failure. Everything inside an entry is optional so that a sloppy
/// but well-formed answer still yields results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OracleAnalysis {
    pub creator_scores: Vec<OracleCreatorScore>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub semantic_matches: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OracleCreatorScore {
    #[serde(default)]
    pub creator_index: Option<i64>,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub detailed_scores: Option<DetailedScores>,
    #[serde(default)]
    pub bonuses: Option<Bonuses>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub collaboration_fit: Option<String>,
    #[serde(default)]
    pub growth_potential: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_factors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optimal_content_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DetailedScores {
    pub audience_alignment: Option<f64>,
    pub content_relevance: Option<f64>,
    pub platform_optimization: Option<f64>,
    pub engagement_quality: Option<f64>,
    pub brand_safety: Option<f64>,
    pub geographic_relevance: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Bonuses {
    pub growth_potential: Option<f64>,
    pub collaboration_fit: Option<f64>,
    pub performance: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl OracleCreatorScore {
    /// Final 0–100 score: the model's total if given, else the recomposed
    /// breakdown, else the neutral default.
    fn final_score(&self) -> u8 {
        let raw = self
            .match_score
            .or_else(|| self.composed_score())
            .unwrap_or(DEFAULT_MATCH_SCORE);
        clamp_score(raw)
    }

    /// base (six capped sub-scores) + capped bonuses − 3 per risk factor.
    fn composed_score(&self) -> Option<f64> {
        let d = self.detailed_scores?;
        let base = capped(d.audience_alignment, 25.0)
            + capped(d.content_relevance, 25.0)
            + capped(d.platform_optimization, 20.0)
            + capped(d.engagement_quality, 15.0)
            + capped(d.brand_safety, 10.0)
            + capped(d.geographic_relevance, 5.0);
        let bonus = self.bonuses.map_or(0.0, |b| {
            capped(b.growth_potential, 10.0)
                + capped(b.collaboration_fit, 15.0)
                + capped(b.performance, 8.0)
        });
        let penalty = RISK_PENALTY * self.risk_factors.len() as f64;
        Some(base + bonus - penalty)
    }

    fn insights(&self) -> AiInsights {
        AiInsights {
            strengths: self.strengths.clone(),
            collaboration_fit: CollaborationFit::from_label(self.collaboration_fit.as_deref()),
            growth_potential: GrowthPotential::from_label(self.growth_potential.as_deref()),
            optimal_content_types: self.optimal_content_types.clone(),
        }
    }
}

fn capped(value: Option<f64>, max: f64) -> f64 {
    value.unwrap_or(0.0).clamp(0.0, max)
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, f64::from(MAX_MATCH_SCORE)) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// ScoringOracle capability
// ────────────────────────────────────────────────────────────────────────────

/// Prompt-in / structured-scores-out. Any error sends the ranker to its fallback.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    async fn score_creators(&self, prompt: &str) -> Result<OracleAnalysis, LlmError>;
}

#[async_trait]
impl ScoringOracle for LlmClient {
    async fn score_creators(&self, prompt: &str) -> Result<OracleAnalysis, LlmError> {
        let system = scoring_system();
        complete_json(
            self,
            CompletionRequest {
                system: &system,
                prompt,
                temperature: 0.1,
                max_tokens: 4000,
            },
        )
        .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OracleRanker
// ────────────────────────────────────────────────────────────────────────────

pub struct OracleRanker {
    oracle: Arc<dyn ScoringOracle>,
}

impl OracleRanker {
    pub fn new(oracle: Arc<dyn ScoringOracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl CreatorRanker for OracleRanker {
    async fn rank(&self, campaign: &Campaign, query: &str, creators: &[Creator]) -> RankingResult {
        if creators.is_empty() {
            return RankingResult::empty(RankingBackend::Oracle);
        }

        let prompt = build_scoring_prompt(campaign, query, creators);
        match self.oracle.score_creators(&prompt).await {
            Ok(analysis) if analysis.creator_scores.is_empty() => {
                warn!(
                    "Creator scoring oracle scored nobody for campaign {}, using keyword fallback",
                    campaign.id
                );
                rank_by_keywords(campaign, query, creators)
            }
            Ok(analysis) => {
                let result = assemble_ranking(analysis, creators);
                info!(
                    "Oracle ranked {} of {} creators for campaign {}",
                    result.results.len(),
                    creators.len(),
                    campaign.id
                );
                result
            }
            Err(e) => {
                warn!(
                    "Creator scoring oracle failed for campaign {}, using keyword fallback: {e}",
                    campaign.id
                );
                rank_by_keywords(campaign, query, creators)
            }
        }
    }
}

/// Maps oracle entries back onto the roster by index. Entries whose index is
/// missing, negative, out of range, or already seen are dropped.
fn assemble_ranking(analysis: OracleAnalysis, creators: &[Creator]) -> RankingResult {
    let mut seen: HashSet<usize> = HashSet::new();
    let mut indexed: Vec<(usize, RankedCreator)> = Vec::with_capacity(analysis.creator_scores.len());

    for entry in &analysis.creator_scores {
        let Some(idx) = entry
            .creator_index
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < creators.len())
        else {
            debug!("Dropping oracle entry with index {:?}", entry.creator_index);
            continue;
        };
        if !seen.insert(idx) {
            debug!("Dropping duplicate oracle entry for index {idx}");
            continue;
        }

        indexed.push((
            idx,
            RankedCreator {
                creator: creators[idx].clone(),
                match_score: entry.final_score(),
                ai_insights: Some(entry.insights()),
            },
        ));
    }

    // Roster order first, so the stable sort breaks ties by storage order
    // regardless of how the oracle listed its entries.
    indexed.sort_by_key(|(idx, _)| *idx);
    let mut ranked: Vec<RankedCreator> = indexed.into_iter().map(|(_, r)| r).collect();
    sort_best_first(&mut ranked);

    let semantic_matches = analysis
        .semantic_matches
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .take(MAX_SEMANTIC_MATCHES)
        .collect();

    RankingResult {
        results: ranked,
        semantic_matches,
        backend: RankingBackend::Oracle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campaign::fixtures::campaign;
    use crate::models::creator::fixtures::creator;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed JSON document, parsed the same way the live client does.
    struct StubOracle {
        response: Value,
        calls: AtomicUsize,
    }

    impl StubOracle {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ScoringOracle for StubOracle {
        async fn score_creators(&self, _prompt: &str) -> Result<OracleAnalysis, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(self.response.clone())?)
        }
    }

    struct FailingOracle;

    #[async_trait]
    impl ScoringOracle for FailingOracle {
        async fn score_creators(&self, _prompt: &str) -> Result<OracleAnalysis, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    /// Simulates a model that answered with prose instead of JSON.
    struct ProseOracle;

    #[async_trait]
    impl ScoringOracle for ProseOracle {
        async fn score_creators(&self, _prompt: &str) -> Result<OracleAnalysis, LlmError> {
            Ok(serde_json::from_str("I'm sorry, I can't score these creators.")?)
        }
    }

    fn test_campaign() -> Campaign {
        campaign(
            "Monsoon Skincare",
            "hydrating serum launch",
            "women in india",
            &["Instagram"],
        )
    }

    fn roster() -> Vec<Creator> {
        vec![
            creator("Maya", "Instagram", "Beauty", "Mumbai", "skincare routines"),
            creator("Dev", "YouTube", "Tech", "Bangalore", "gadget reviews"),
            creator("Isha", "Instagram", "Lifestyle", "Delhi", "serum reviews"),
            creator("Kabir", "TikTok", "Comedy", "Pune", "sketches"),
        ]
    }

    fn scores(pairs: &[(i64, f64)]) -> Value {
        json!({
            "creator_scores": pairs.iter().map(|(i, s)| json!({
                "creator_index": i,
                "match_score": s,
                "strengths": ["authentic voice"],
                "collaboration_fit": "good",
                "growth_potential": "high",
                "optimal_content_types": ["reels"]
            })).collect::<Vec<_>>(),
            "semantic_matches": ["skincare", "serum", "hydration", "beauty", "india"]
        })
    }

    fn ranker(oracle: Arc<dyn ScoringOracle>) -> OracleRanker {
        OracleRanker::new(oracle)
    }

    #[tokio::test]
    async fn test_every_index_maps_to_its_creator() {
        let creators = roster();
        let oracle = StubOracle::new(scores(&[(0, 91.0), (1, 12.0), (2, 64.0), (3, 30.0)]));
        let result = ranker(oracle).rank(&test_campaign(), "skincare", &creators).await;

        assert_eq!(result.backend, RankingBackend::Oracle);
        assert_eq!(result.results.len(), creators.len());
        let by_name: Vec<(&str, u8)> = result
            .results
            .iter()
            .map(|r| (r.creator.name.as_str(), r.match_score))
            .collect();
        assert_eq!(
            by_name,
            vec![("Maya", 91), ("Isha", 64), ("Kabir", 30), ("Dev", 12)]
        );
        let insights = result.results[0].ai_insights.as_ref().unwrap();
        assert_eq!(insights.collaboration_fit, CollaborationFit::Good);
        assert_eq!(insights.growth_potential, GrowthPotential::High);
        assert_eq!(result.semantic_matches.len(), 5);
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_dropped() {
        let creators = roster();
        let oracle = StubOracle::new(scores(&[(0, 80.0), (4, 99.0), (-1, 99.0), (2, 70.0)]));
        let result = ranker(oracle).rank(&test_campaign(), "skincare", &creators).await;

        assert_eq!(result.backend, RankingBackend::Oracle);
        let names: Vec<&str> = result.results.iter().map(|r| r.creator.name.as_str()).collect();
        assert_eq!(names, vec!["Maya", "Isha"]);
    }

    #[tokio::test]
    async fn test_missing_index_and_duplicates_are_dropped() {
        let creators = roster();
        let oracle = StubOracle::new(json!({
            "creator_scores": [
                {"match_score": 99},
                {"creator_index": 1, "match_score": 40},
                {"creator_index": 1, "match_score": 90}
            ]
        }));
        let result = ranker(oracle).rank(&test_campaign(), "q", &creators).await;
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].creator.name, "Dev");
        assert_eq!(result.results[0].match_score, 40);
    }

    #[tokio::test]
    async fn test_scores_are_clamped() {
        let creators = roster();
        let oracle = StubOracle::new(scores(&[(0, 140.0), (1, -20.0), (2, 99.6)]));
        let result = ranker(oracle).rank(&test_campaign(), "q", &creators).await;
        let scores: Vec<u8> = result.results.iter().map(|r| r.match_score).collect();
        assert_eq!(scores, vec![100, 100, 0]);
        assert!(result.results.iter().all(|r| r.match_score <= 100));
    }

    #[tokio::test]
    async fn test_ties_keep_roster_order() {
        let creators = roster();
        // Oracle lists them out of roster order; equal scores must come back in roster order.
        let oracle = StubOracle::new(scores(&[(3, 75.0), (1, 75.0), (0, 75.0), (2, 75.0)]));
        let result = ranker(oracle).rank(&test_campaign(), "q", &creators).await;
        let names: Vec<&str> = result.results.iter().map(|r| r.creator.name.as_str()).collect();
        assert_eq!(names, vec!["Maya", "Dev", "Isha", "Kabir"]);
    }

    #[tokio::test]
    async fn test_oracle_error_equals_keyword_fallback() {
        let creators = roster();
        let campaign = test_campaign();
        let result = ranker(Arc::new(FailingOracle))
            .rank(&campaign, "skincare serum", &creators)
            .await;

        assert_eq!(result, rank_by_keywords(&campaign, "skincare serum", &creators));
        assert_eq!(result.backend, RankingBackend::Keyword);
        assert!(result.results.len() <= 15);
        assert!(result.results.iter().all(|r| r.ai_insights.is_none()));
    }

    #[tokio::test]
    async fn test_unparsable_output_falls_back() {
        let creators = roster();
        let campaign = test_campaign();
        let result = ranker(Arc::new(ProseOracle)).rank(&campaign, "serum", &creators).await;
        assert_eq!(result, rank_by_keywords(&campaign, "serum", &creators));
    }

    #[tokio::test]
    async fn test_answer_without_scores_falls_back() {
        let creators = roster();
        let campaign = test_campaign();
        let expected = rank_by_keywords(&campaign, "serum", &creators);
        assert!(!expected.results.is_empty());

        for body in [
            json!({}),
            json!([]),
            json!({"results": [{"creator_index": 0, "match_score": 90}]}),
            json!({"creator_scores": null}),
            json!({"creator_scores": [], "semantic_matches": ["serum"]}),
        ] {
            let oracle = StubOracle::new(body.clone());
            let result = ranker(oracle).rank(&campaign, "serum", &creators).await;
            assert_eq!(result, expected, "answer {body} should use the keyword fallback");
        }
    }

    #[tokio::test]
    async fn test_fallback_with_no_overlap_is_empty() {
        let creators = vec![
            creator("Lena", "TikTok", "Gaming", "Berlin", "speedruns"),
            creator("Omar", "Twitch", "Esports", "Cairo", "tournaments"),
        ];
        let result = ranker(Arc::new(FailingOracle))
            .rank(&test_campaign(), "cooking recipes", &creators)
            .await;
        assert!(result.results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_roster_skips_oracle() {
        let oracle = StubOracle::new(scores(&[(0, 90.0)]));
        let result = ranker(oracle.clone()).rank(&test_campaign(), "q", &[]).await;
        assert!(result.results.is_empty());
        assert!(result.semantic_matches.is_empty());
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ranking_is_idempotent() {
        let creators = roster();
        let campaign = test_campaign();
        let oracle = StubOracle::new(scores(&[(2, 50.0), (0, 50.0), (1, 80.0), (3, 10.0)]));
        let r = ranker(oracle);
        let first = r.rank(&campaign, "serum", &creators).await;
        let second = r.rank(&campaign, "serum", &creators).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_total_is_recomposed_from_breakdown() {
        let creators = roster();
        let oracle = StubOracle::new(json!({
            "creator_scores": [{
                "creator_index": 0,
                "detailed_scores": {
                    "audience_alignment": 30,
                    "content_relevance": 20,
                    "platform_optimization": 18,
                    "engagement_quality": 14,
                    "brand_safety": 8,
                    "geographic_relevance": 3
                },
                "bonuses": {"growth_potential": 5, "collaboration_fit": 0, "performance": 4},
                "risk_factors": ["controversial past", "inactive months"]
            }]
        }));
        let result = ranker(oracle).rank(&test_campaign(), "q", &creators).await;
        // base 25 (capped) + 20 + 18 + 14 + 8 + 3 = 88, bonus 9, penalty 6 → 91
        assert_eq!(result.results[0].match_score, 91);
    }

    #[tokio::test]
    async fn test_missing_everything_defaults_to_fifty_and_fair_medium() {
        let creators = roster();
        let oracle = StubOracle::new(json!({
            "creator_scores": [{"creator_index": 2, "strengths": null, "collaboration_fit": "unclear"}],
            "semantic_matches": null
        }));
        let result = ranker(oracle).rank(&test_campaign(), "q", &creators).await;
        let top = &result.results[0];
        assert_eq!(top.match_score, 50);
        let insights = top.ai_insights.as_ref().unwrap();
        assert!(insights.strengths.is_empty());
        assert_eq!(insights.collaboration_fit, CollaborationFit::Fair);
        assert_eq!(insights.growth_potential, GrowthPotential::Medium);
        assert!(result.semantic_matches.is_empty());
    }

    #[test]
    fn test_clamp_score_rounds() {
        assert_eq!(clamp_score(84.4), 84);
        assert_eq!(clamp_score(84.5), 85);
        assert_eq!(clamp_score(f64::NAN), 0);
        assert_eq!(clamp_score(1e9), 100);
    }
}
