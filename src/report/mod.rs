pub mod json;
pub mod md;

use crate::error::StackError;
use crate::inventory::{ScoredSupplement, TieredInventory};
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub version: String,
    pub generated_at: String,
    pub catalog_digest: String,
    pub personalized: bool,
    pub tiers: TieredInventory,
}

impl InventoryReport {
    pub fn new(catalog_digest: &str, personalized: bool, tiers: TieredInventory) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            catalog_digest: catalog_digest.to_string(),
            personalized,
            tiers,
        }
    }
}

pub fn render(report: &InventoryReport, format: OutputFormat) -> Result<String, StackError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(StackError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

pub fn render_item(item: &ScoredSupplement, format: OutputFormat) -> Result<String, StackError> {
    match format {
        OutputFormat::Json => json::item_to_json(item).map_err(StackError::Json),
        OutputFormat::Md => Ok(md::item_to_markdown(item)),
    }
}
