use crate::models::campaign::Campaign;
use crate::models::creator::Creator;
use crate::models::deal::DealRow;

const TERMS: [&str; 5] = [
    "Content creation and posting requirements",
    "Usage rights and licensing",
    "Payment terms and conditions",
    "Performance metrics and reporting",
    "Cancellation and modification clauses",
];

/// Agreement text, one PDF line per text line.
pub fn build_contract_text(deal: &DealRow, campaign: &Campaign, creator: &Creator) -> String {
    let mut lines = vec![
        "INFLUENCER MARKETING AGREEMENT".to_string(),
        String::new(),
        format!("Effective Date: {}", deal.created_at.format("%Y-%m-%d")),
        format!("Campaign: {}", campaign.title),
        format!("Creator: {} ({})", creator.name, creator.handle),
        format!("Platform: {}", deal.platform),
        format!("Rate: {}", deal.rate),
        format!("Deliverables: {}", deal.deliverables),
        format!("Timeline: {}", deal.timeline),
        String::new(),
        "Terms and Conditions:".to_string(),
    ];
    lines.extend(
        TERMS
            .iter()
            .enumerate()
            .map(|(i, term)| format!("{}. {term}", i + 1)),
    );
    lines.join("\n")
}
