use super::InventoryReport;
use crate::inventory::ScoredSupplement;

pub fn to_json(report: &InventoryReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn item_to_json(item: &ScoredSupplement) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(item)
}
