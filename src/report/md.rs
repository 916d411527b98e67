use super::InventoryReport;
use crate::inventory::ScoredSupplement;
use crate::types::scoring::{Polarity, Tier};

pub fn to_markdown(report: &InventoryReport) -> String {
    let mut output = String::new();
    output.push_str("# Supplement Relevance\n\n");
    output.push_str(&format!(
        "Personalized: {}\n\n",
        if report.personalized { "yes" } else { "no" }
    ));

    for tier in [Tier::Essential, Tier::Optimizer, Tier::Niche] {
        let items = report.tiers.tier(tier);
        output.push_str(&format!("## {} ({})\n\n", heading(tier), items.len()));
        if items.is_empty() {
            output.push_str("- none\n\n");
            continue;
        }
        for item in items {
            output.push_str(&format!(
                "- {} `{}`: {:.1}{}\n",
                item.name,
                item.id,
                item.result.final_score,
                delta_suffix(item)
            ));
            for warning in &item.result.warnings {
                output.push_str(&format!("  - warning: {warning}\n"));
            }
        }
        output.push('\n');
    }

    output
}

/// Single-item breakdown, reasons grouped by category.
pub fn item_to_markdown(item: &ScoredSupplement) -> String {
    let result = &item.result;
    let mut output = String::new();
    output.push_str(&format!("# {} (`{}`)\n\n", item.name, item.id));
    output.push_str(&format!(
        "- base score: {:.1}\n- final score: {:.1}\n- tier: {}\n- personalized: {}\n\n",
        result.base_score,
        result.final_score,
        result.tier,
        if result.is_personalized { "yes" } else { "no" }
    ));

    output.push_str("## Reasons\n\n");
    let groups = result.reasons_by_category();
    if groups.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for (category, reasons) in groups {
            output.push_str(&format!("### {category}\n\n"));
            for reason in reasons {
                let marker = match reason.polarity {
                    Polarity::Positive => "[+]",
                    Polarity::Negative => "[-]",
                    Polarity::Neutral => "[=]",
                };
                output.push_str(&format!("- {marker} {reason}\n"));
            }
            output.push('\n');
        }
    }

    output.push_str("## Warnings\n\n");
    if result.warnings.is_empty() {
        output.push_str("- none\n");
    } else {
        for warning in &result.warnings {
            output.push_str(&format!("- {warning}\n"));
        }
    }

    output
}

fn heading(tier: Tier) -> &'static str {
    match tier {
        Tier::Essential => "Essential",
        Tier::Optimizer => "Optimizer",
        Tier::Niche => "Niche",
    }
}

fn delta_suffix(item: &ScoredSupplement) -> String {
    if !item.result.is_personalized {
        return String::new();
    }
    let delta = item.result.delta();
    if delta >= 0.0 {
        format!(" (base {:.1}, +{:.1})", item.result.base_score, delta)
    } else {
        format!(" (base {:.1}, {:.1})", item.result.base_score, delta)
    }
}
