use crate::catalog::{Catalog, Supplement};
use crate::scorer::RelevanceScorer;
use crate::types::context::UserRelevanceContext;
use crate::types::scoring::{RelevanceScoreResult, Tier};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredSupplement {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub result: RelevanceScoreResult,
}

impl ScoredSupplement {
    pub fn score(
        supplement: &Supplement,
        context: Option<&UserRelevanceContext>,
        scorer: &RelevanceScorer,
    ) -> Self {
        Self {
            id: supplement.id.clone(),
            name: supplement.name.clone(),
            category: supplement.category.clone(),
            result: scorer.score(supplement.impact_score, supplement.matrix(), context),
        }
    }
}

/// Scores every supplement and orders by final score, highest first; ties by id.
pub fn rank(
    catalog: &Catalog,
    context: Option<&UserRelevanceContext>,
    scorer: &RelevanceScorer,
) -> Vec<ScoredSupplement> {
    let mut ranked = catalog
        .supplements
        .iter()
        .map(|supplement| ScoredSupplement::score(supplement, context, scorer))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        b.result
            .final_score
            .partial_cmp(&a.result.final_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    tracing::debug!(
        count = ranked.len(),
        personalized = ranked.iter().filter(|item| item.result.is_personalized).count(),
        "ranked inventory"
    );
    ranked
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TieredInventory {
    pub essential: Vec<ScoredSupplement>,
    pub optimizer: Vec<ScoredSupplement>,
    pub niche: Vec<ScoredSupplement>,
}

impl TieredInventory {
    pub fn from_ranked(ranked: Vec<ScoredSupplement>) -> Self {
        let mut tiers = Self::default();
        for item in ranked {
            match item.result.tier {
                Tier::Essential => tiers.essential.push(item),
                Tier::Optimizer => tiers.optimizer.push(item),
                Tier::Niche => tiers.niche.push(item),
            }
        }
        tiers
    }

    pub fn tier(&self, tier: Tier) -> &[ScoredSupplement] {
        match tier {
            Tier::Essential => &self.essential,
            Tier::Optimizer => &self.optimizer,
            Tier::Niche => &self.niche,
        }
    }

    pub fn retain_tier(&mut self, keep: Tier) {
        if keep != Tier::Essential {
            self.essential.clear();
        }
        if keep != Tier::Optimizer {
            self.optimizer.clear();
        }
        if keep != Tier::Niche {
            self.niche.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.essential.len() + self.optimizer.len() + self.niche.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
