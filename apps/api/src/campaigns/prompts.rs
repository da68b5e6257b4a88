// All LLM prompt constants for campaign brief enhancement.

pub const BRIEF_SYSTEM: &str = "You are a seasoned brand strategist who rewrites campaign \
    briefs to make them clear, exciting, and inspiring for modern creators to collaborate on.";

/// Brief enhancement prompt template.
/// Replace: {title}, {audience}, {platforms}, {brief}
pub const BRIEF_PROMPT_TEMPLATE: &str = r#"Here is a campaign that needs an enhanced brief.

Title: {title}
Target Audience: {audience}
Platforms: {platforms}
Original Brief: {brief}

Rewrite it as an engaging influencer brief. Do not invent a brand name if none is mentioned.
Return only the rewritten brief text."#;
