use super::matrix::Category;
use super::scoring::{Score, Tier, MAX_SCORE, MIN_SCORE};
use crate::error::StackError;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackConfig {
    pub tiers: Option<TiersConfig>,
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    pub essential: Option<Score>,
    pub optimizer: Option<Score>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub category_order: Option<Vec<Category>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub essential: Score,
    pub optimizer: Score,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            essential: 7.5,
            optimizer: 5.0,
        }
    }
}

impl TierThresholds {
    /// Lower bounds are inclusive: a score exactly on a threshold takes the higher tier.
    pub fn tier_for(&self, score: Score) -> Tier {
        if score >= self.essential {
            Tier::Essential
        } else if score >= self.optimizer {
            Tier::Optimizer
        } else {
            Tier::Niche
        }
    }
}

/// Resolved scorer settings handed to every scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerConfig {
    pub thresholds: TierThresholds,
    pub category_order: Vec<Category>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::default(),
            category_order: Category::ALL.to_vec(),
        }
    }
}

impl ScorerConfig {
    /// `category_order` with repeats dropped and any missing category
    /// appended in default order, so each modifier is visited exactly once.
    pub fn evaluation_order(&self) -> Vec<Category> {
        let mut order = Vec::with_capacity(Category::ALL.len());
        for category in self.category_order.iter().chain(Category::ALL.iter()) {
            if !order.contains(category) {
                order.push(*category);
            }
        }
        order
    }
}

impl StackConfig {
    pub fn tier_thresholds(&self) -> TierThresholds {
        let defaults = TierThresholds::default();
        match &self.tiers {
            Some(tiers) => TierThresholds {
                essential: tiers.essential.unwrap_or(defaults.essential),
                optimizer: tiers.optimizer.unwrap_or(defaults.optimizer),
            },
            None => defaults,
        }
    }

    pub fn category_order(&self) -> Vec<Category> {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.category_order.clone())
            .unwrap_or_else(|| Category::ALL.to_vec())
    }

    pub fn scorer_config(&self) -> ScorerConfig {
        ScorerConfig {
            thresholds: self.tier_thresholds(),
            category_order: self.category_order(),
        }
    }

    pub fn validate(&self) -> Result<(), StackError> {
        let thresholds = self.tier_thresholds();
        for (name, value) in [
            ("essential", thresholds.essential),
            ("optimizer", thresholds.optimizer),
        ] {
            if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(StackError::ConfigParse(format!(
                    "tiers.{name} must be between {MIN_SCORE:.1} and {MAX_SCORE:.1}"
                )));
            }
        }
        if thresholds.essential <= thresholds.optimizer {
            return Err(StackError::ConfigParse(format!(
                "tiers.essential ({:.2}) must be greater than tiers.optimizer ({:.2})",
                thresholds.essential, thresholds.optimizer
            )));
        }

        if let Some(order) = self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.category_order.as_ref())
        {
            validate_category_order(order)?;
        }

        Ok(())
    }
}

fn validate_category_order(order: &[Category]) -> Result<(), StackError> {
    let mut seen = HashSet::new();
    for category in order {
        if !seen.insert(*category) {
            return Err(StackError::ConfigParse(format!(
                "scoring.category_order contains duplicate category: {category}"
            )));
        }
    }
    let missing = Category::ALL
        .iter()
        .filter(|category| !seen.contains(*category))
        .map(|category| category.as_str())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(StackError::ConfigParse(format!(
            "scoring.category_order is missing category(s): {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: StackConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.scorer_config(), ScorerConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn tiers_and_order_override_defaults() {
        let cfg: StackConfig = toml::from_str(
            r#"
[tiers]
essential = 8.0

[scoring]
category_order = ["bloodwork", "goal", "demographic", "protocol", "synergy"]
"#,
        )
        .expect("config should parse");
        let scorer = cfg.scorer_config();
        assert_eq!(scorer.thresholds.essential, 8.0);
        assert_eq!(scorer.thresholds.optimizer, 5.0);
        assert_eq!(scorer.category_order[0], Category::Bloodwork);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        let thresholds = TierThresholds::default();
        assert_eq!(thresholds.tier_for(7.5), Tier::Essential);
        assert_eq!(thresholds.tier_for(7.49), Tier::Optimizer);
        assert_eq!(thresholds.tier_for(5.0), Tier::Optimizer);
        assert_eq!(thresholds.tier_for(4.99), Tier::Niche);
        assert_eq!(thresholds.tier_for(0.0), Tier::Niche);
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let cfg: StackConfig = toml::from_str(
            r#"
[tiers]
essential = 4.0
optimizer = 6.0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("must be greater than"));
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let cfg: StackConfig = toml::from_str(
            r#"
[tiers]
essential = 11.0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("tiers.essential must be between"));
    }

    #[test]
    fn validate_rejects_incomplete_category_order() {
        let cfg: StackConfig = toml::from_str(
            r#"
[scoring]
category_order = ["goal", "goal", "synergy"]
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("duplicate category: goal"));

        let cfg: StackConfig = toml::from_str(
            r#"
[scoring]
category_order = ["goal", "synergy"]
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("demographic, protocol, bloodwork"));
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let parsed = toml::from_str::<StackConfig>(
            r#"
[scoring]
category_order = ["mood"]
"#,
        );
        assert!(parsed.is_err());
    }
}
