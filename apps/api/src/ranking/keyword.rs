//! Keyword fallback ranker. Fast, deterministic, no model call.
//!
//! Algorithm:
//! 1. Lower-case and whitespace-split the query, the campaign text
//!    (title + effective brief + audience + platforms) and each creator's text
//!    (name + description + category + platform + location) into word sets.
//! 2. raw = 3 × |query ∩ creator| + 2 × |campaign ∩ creator| + 5 × platform_match
//! 3. Drop raw == 0, match_score = min(100, raw × 5)
//! 4. Stable sort best-first, keep the top 15.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::models::campaign::Campaign;
use crate::models::creator::Creator;
use crate::ranking::{
    sort_best_first, CreatorRanker, RankedCreator, RankingBackend, RankingResult, MAX_MATCH_SCORE,
};

const QUERY_WEIGHT: usize = 3;
const CAMPAIGN_WEIGHT: usize = 2;
const PLATFORM_WEIGHT: usize = 5;
const SCORE_MULTIPLIER: usize = 5;
pub const MAX_FALLBACK_RESULTS: usize = 15;
const MAX_SEMANTIC_MATCHES: usize = 5;

pub struct KeywordRanker;

#[async_trait]
impl CreatorRanker for KeywordRanker {
    async fn rank(&self, campaign: &Campaign, query: &str, creators: &[Creator]) -> RankingResult {
        rank_by_keywords(campaign, query, creators)
    }
}

/// Synchronous core shared by `KeywordRanker` and the oracle fallback path.
pub fn rank_by_keywords(campaign: &Campaign, query: &str, creators: &[Creator]) -> RankingResult {
    let query_words = word_set(query);
    let campaign_words = word_set(&campaign_text(campaign));
    let campaign_platforms: Vec<String> =
        campaign.platforms.iter().map(|p| p.to_lowercase()).collect();

    let mut ranked: Vec<RankedCreator> = creators
        .iter()
        .filter_map(|creator| {
            let creator_words = word_set(&creator_text(creator));
            let query_hits = query_words.intersection(&creator_words).count();
            let campaign_hits = campaign_words.intersection(&creator_words).count();
            let platform_hit = campaign_platforms.contains(&creator.platform.to_lowercase());

            let raw = QUERY_WEIGHT * query_hits
                + CAMPAIGN_WEIGHT * campaign_hits
                + if platform_hit { PLATFORM_WEIGHT } else { 0 };

            (raw > 0).then(|| RankedCreator {
                creator: creator.clone(),
                match_score: raw
                    .saturating_mul(SCORE_MULTIPLIER)
                    .min(MAX_MATCH_SCORE as usize) as u8,
                ai_insights: None,
            })
        })
        .collect();

    sort_best_first(&mut ranked);
    ranked.truncate(MAX_FALLBACK_RESULTS);

    let semantic_matches = fallback_semantic_matches(query, &ranked);

    RankingResult {
        results: ranked,
        semantic_matches,
        backend: RankingBackend::Keyword,
    }
}

fn campaign_text(campaign: &Campaign) -> String {
    format!(
        "{} {} {} {}",
        campaign.title,
        campaign.effective_brief(),
        campaign.audience,
        campaign.platforms.join(" ")
    )
}

fn creator_text(creator: &Creator) -> String {
    format!(
        "{} {} {} {} {}",
        creator.name, creator.description, creator.category, creator.platform, creator.location
    )
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// First two query words plus the categories of the top three creators,
/// de-duplicated, at most five. Treated as an unordered set by callers.
fn fallback_semantic_matches(query: &str, ranked: &[RankedCreator]) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let candidates = query_lower
        .split_whitespace()
        .take(2)
        .map(str::to_string)
        .chain(ranked.iter().take(3).map(|r| r.creator.category.clone()));

    let mut keywords: Vec<String> = Vec::new();
    for candidate in candidates {
        if !keywords.contains(&candidate) {
            keywords.push(candidate);
        }
    }
    keywords.truncate(MAX_SEMANTIC_MATCHES);
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campaign::fixtures::campaign;
    use crate::models::creator::fixtures::creator;

    fn fitness_campaign() -> Campaign {
        campaign(
            "Summer Fitness Challenge",
            "Promote our protein shakes",
            "young adults",
            &["Instagram", "YouTube"],
        )
    }

    #[test]
    fn test_score_formula() {
        // query hits: "fitness" (1) → 3
        // campaign hits: "fitness", "protein", "instagram" (3) → 6
        // platform match → 5
        // raw = 14 → 70
        let c = creator(
            "Arjun",
            "Instagram",
            "Health",
            "Pune",
            "daily fitness and protein tips",
        );
        let result = rank_by_keywords(&fitness_campaign(), "fitness", &[c]);
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].match_score, 70);
        assert_eq!(result.backend, RankingBackend::Keyword);
    }

    #[test]
    fn test_platform_match_is_case_insensitive() {
        let c = creator("Zed", "instagram", "Travel", "Goa", "beaches");
        let result = rank_by_keywords(&fitness_campaign(), "nothing relevant", &[c]);
        // "instagram" also appears in campaign words → 2 + 5 = 7 → 35
        assert_eq!(result.results[0].match_score, 35);
    }

    #[test]
    fn test_score_is_capped_at_100() {
        let c = creator(
            "summer fitness challenge",
            "YouTube",
            "fitness",
            "young adults",
            "promote our protein shakes instagram youtube summer fitness",
        );
        let result = rank_by_keywords(
            &fitness_campaign(),
            "summer fitness challenge protein shakes young adults",
            &[c],
        );
        assert_eq!(result.results[0].match_score, 100);
    }

    #[test]
    fn test_no_overlap_returns_empty() {
        let creators = vec![
            creator("Lena", "TikTok", "Gaming", "Berlin", "speedruns"),
            creator("Omar", "Twitch", "Esports", "Cairo", "tournaments"),
        ];
        let result = rank_by_keywords(&fitness_campaign(), "cooking recipes", &creators);
        assert!(result.results.is_empty());
        assert_eq!(result.semantic_matches, vec!["cooking", "recipes"]);
    }

    #[test]
    fn test_truncates_to_fifteen() {
        let creators: Vec<Creator> = (0..20)
            .map(|i| creator(&format!("Creator{i}"), "Instagram", "Fitness", "Delhi", "gym"))
            .collect();
        let result = rank_by_keywords(&fitness_campaign(), "gym", &creators);
        assert_eq!(result.results.len(), MAX_FALLBACK_RESULTS);
    }

    #[test]
    fn test_blank_query_ranks_on_campaign_text() {
        let c = creator("Arjun", "Instagram", "Health", "Pune", "daily fitness and protein tips");
        let result = rank_by_keywords(&fitness_campaign(), "   ", &[c]);
        // campaign hits: "fitness", "protein", "instagram" (3) → 6, platform match → 5
        // raw = 11 → 55
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].match_score, 55);
        assert_eq!(result.semantic_matches, vec!["Health"]);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let creators: Vec<Creator> = (0..5)
            .map(|i| creator(&format!("Twin{i}"), "Instagram", "Fitness", "Delhi", "gym"))
            .collect();
        let result = rank_by_keywords(&fitness_campaign(), "gym", &creators);
        let ids: Vec<_> = result.results.iter().map(|r| r.creator.id).collect();
        let expected: Vec<_> = creators.iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_sorted_descending() {
        let creators = vec![
            creator("Low", "TikTok", "Misc", "Delhi", "gym"),
            creator("High", "Instagram", "Fitness", "Delhi", "gym protein fitness"),
            creator("Mid", "Instagram", "Misc", "Delhi", "nothing"),
        ];
        let result = rank_by_keywords(&fitness_campaign(), "gym", &creators);
        let scores: Vec<u8> = result.results.iter().map(|r| r.match_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
        assert_eq!(result.results[0].creator.name, "High");
    }

    #[test]
    fn test_semantic_matches_dedup_and_limit() {
        let creators = vec![
            creator("A", "Instagram", "fitness", "Delhi", "gym"),
            creator("B", "Instagram", "Wellness", "Delhi", "gym"),
            creator("C", "Instagram", "Nutrition", "Delhi", "gym"),
            creator("D", "Instagram", "Yoga", "Delhi", "gym"),
        ];
        let result = rank_by_keywords(&fitness_campaign(), "Fitness gym influencers", &creators);
        let keywords = &result.semantic_matches;
        assert!(keywords.len() <= 5);
        assert!(keywords.contains(&"fitness".to_string()));
        assert!(keywords.contains(&"gym".to_string()));
        assert!(!keywords.contains(&"influencers".to_string()));
        assert!(!keywords.contains(&"Yoga".to_string()));
        let unique: HashSet<&String> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn test_uses_enhanced_brief() {
        let mut c = fitness_campaign();
        c.enhanced_brief = Some("marathon runners".to_string());
        let runner = creator("Ria", "Strava", "Sport", "Delhi", "marathon");
        let result = rank_by_keywords(&c, "", &[runner]);
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].match_score, 10);
    }

    #[tokio::test]
    async fn test_keyword_ranker_trait_matches_core() {
        let creators = vec![creator("A", "Instagram", "Fitness", "Delhi", "gym")];
        let campaign = fitness_campaign();
        let via_trait = KeywordRanker.rank(&campaign, "gym", &creators).await;
        assert_eq!(via_trait, rank_by_keywords(&campaign, "gym", &creators));
    }
}
