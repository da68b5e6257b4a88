// All LLM prompt constants for creator ranking.

use crate::llm_client::prompts::{fill_template, platform_text, JSON_ONLY_INSTRUCTION};
use crate::models::campaign::Campaign;
use crate::models::creator::Creator;

/// System prompt for creator scoring.
pub fn scoring_system() -> String {
    format!("You are a precise influencer analytics AI. {JSON_ONLY_INSTRUCTION}")
}

/// Creator scoring prompt template.
/// Replace: {title}, {brief}, {audience}, {platforms}, {budget}, {query},
///          {creators}, {max_index}
pub const SCORING_PROMPT_TEMPLATE: &str = r#"You are an elite influencer marketing analyst. Analyze this campaign and score ALL creators in a single response.

CAMPAIGN DETAILS:
- Title: {title}
- Brief: {brief}
- Target Audience: {audience}
- Platforms: {platforms}
- Budget: {budget}
- Search Query: {query}

CREATORS TO ANALYZE:
{creators}

SCORING CRITERIA (base total 100 points):
1. Audience Alignment (0-25): how well their audience matches the target demographics
2. Content Relevance (0-25): alignment with content themes and industry vertical
3. Platform Optimization (0-20): platform expertise and content format mastery
4. Engagement Quality (0-15): authentic engagement relative to follower count
5. Brand Safety (0-10): professional reputation and content appropriateness
6. Geographic Relevance (0-5): location alignment with campaign needs

ADDITIONAL SCORING FACTORS:
- Growth Potential Bonus: high (+10), medium (+5), low (0)
- Collaboration Fit Bonus: excellent (+15), good (+10), fair (+5), poor (0)
- Performance Bonus: above average (+8), average (+4), below average (0)
- Risk Penalty: -3 per risk factor

Return a JSON object with this EXACT structure:
{
  "campaign_requirements": {
    "target_demographics": ["demographic1", "demographic2"],
    "content_style": ["style1", "style2"],
    "industry_vertical": "primary industry",
    "platform_priorities": ["platform1", "platform2"],
    "content_themes": ["theme1", "theme2", "theme3"]
  },
  "creator_scores": [
    {
      "creator_index": 0,
      "match_score": 85,
      "detailed_scores": {
        "audience_alignment": 22,
        "content_relevance": 20,
        "platform_optimization": 18,
        "engagement_quality": 14,
        "brand_safety": 8,
        "geographic_relevance": 3
      },
      "bonuses": {
        "growth_potential": 10,
        "collaboration_fit": 15,
        "performance": 8
      },
      "penalties": {
        "risk_factors": 0
      },
      "strengths": ["strength1", "strength2"],
      "collaboration_fit": "excellent",
      "growth_potential": "high",
      "estimated_performance": "above_average",
      "risk_factors": [],
      "optimal_content_types": ["content_type1", "content_type2"]
    }
  ],
  "semantic_matches": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"]
}

HARD RULES:
1. Score ALL creators provided, using the bracketed index shown for each (creator_index 0 to {max_index})
2. match_score = base score + bonuses - penalties, capped at 100
3. collaboration_fit is one of: poor, fair, good, excellent
4. growth_potential is one of: low, medium, high
5. Include 5-7 semantic keywords that represent the search intent"#;

/// Fills the scoring template. Creators are listed with their 0-based roster index.
pub fn build_scoring_prompt(campaign: &Campaign, query: &str, creators: &[Creator]) -> String {
    let creators_text = creators
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            format!(
                "Creator [{idx}]:\n\
                 - Name: {}\n\
                 - Handle: {}\n\
                 - Platform: {}\n\
                 - Followers: {}\n\
                 - Engagement: {}\n\
                 - Category: {}\n\
                 - Location: {}\n\
                 - Description: {}",
                c.name,
                c.handle,
                c.platform,
                c.followers,
                c.engagement,
                c.category,
                c.location,
                c.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    fill_template(
        SCORING_PROMPT_TEMPLATE,
        &[
            ("title", campaign.title.as_str()),
            ("brief", campaign.effective_brief()),
            ("audience", campaign.audience.as_str()),
            ("platforms", platform_text(&campaign.platforms).as_str()),
            ("budget", campaign.budget.as_str()),
            ("query", query),
            ("max_index", creators.len().saturating_sub(1).to_string().as_str()),
            ("creators", creators_text.as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campaign::fixtures::campaign;
    use crate::models::creator::fixtures::creator;

    #[test]
    fn test_prompt_embeds_campaign_and_indexed_creators() {
        let mut c = campaign("Glow Up", "sell serum", "women 25-34", &["Instagram", "YouTube"]);
        c.enhanced_brief = Some("An exciting serum launch".to_string());
        let creators = vec![
            creator("Maya", "Instagram", "Beauty", "Mumbai", "skincare reviews"),
            creator("Dev", "YouTube", "Tech", "Bangalore", "gadgets"),
        ];

        let prompt = build_scoring_prompt(&c, "skincare experts", &creators);

        assert!(prompt.contains("- Title: Glow Up"));
        assert!(prompt.contains("- Brief: An exciting serum launch"));
        assert!(!prompt.contains("sell serum"));
        assert!(prompt.contains("- Platforms: Instagram, YouTube"));
        assert!(prompt.contains("- Search Query: skincare experts"));
        assert!(prompt.contains("Creator [0]:\n- Name: Maya"));
        assert!(prompt.contains("Creator [1]:\n- Name: Dev"));
        assert!(prompt.contains("creator_index 0 to 1"));
        assert!(!prompt.contains("{creators}"));
    }

    #[test]
    fn test_placeholders_in_user_text_stay_literal() {
        let c = campaign("Launch {creators}", "brief", "all", &["Instagram"]);
        let creators = vec![creator("Maya", "Instagram", "Beauty", "Mumbai", "skincare")];

        let prompt = build_scoring_prompt(&c, "find {creators} and {query}", &creators);

        assert!(prompt.contains("- Title: Launch {creators}"));
        assert!(prompt.contains("- Search Query: find {creators} and {query}"));
        assert_eq!(prompt.matches("- Name: Maya").count(), 1);
    }
}
