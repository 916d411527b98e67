use crate::types::config::ScorerConfig;
use crate::types::context::UserRelevanceContext;
use crate::types::matrix::RelevanceMatrix;
use crate::types::scoring::{Reason, RelevanceScoreResult, Score, MAX_SCORE, MIN_SCORE};

/// Scores supplements against a user context with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    config: ScorerConfig,
}

impl RelevanceScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn score(
        &self,
        base_score: Score,
        matrix: Option<&RelevanceMatrix>,
        context: Option<&UserRelevanceContext>,
    ) -> RelevanceScoreResult {
        calculate_relevance_score(base_score, matrix, context, &self.config)
    }
}

/// Computes the personalized relevance of one item.
///
/// Modifiers are visited category by category in `config.evaluation_order()`,
/// and in declaration order within a category. Every matching modifier
/// contributes its delta and one reason; matches are cumulative. The sum is
/// clamped to `[0, 10]` once, after all deltas are applied; a sum that
/// overflows to infinity still clamps to the nearest bound. Never fails:
/// missing inputs fall back to the unpersonalized base score.
pub fn calculate_relevance_score(
    base_score: Score,
    matrix: Option<&RelevanceMatrix>,
    context: Option<&UserRelevanceContext>,
    config: &ScorerConfig,
) -> RelevanceScoreResult {
    let base_score = clamp_score(base_score);

    let (matrix, context) = match (matrix, context) {
        (Some(matrix), Some(context)) if !matrix.is_empty() => (matrix, context),
        _ => return baseline(base_score, config),
    };

    let mut final_score = base_score;
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    for category in config.evaluation_order() {
        for modifier in matrix.in_category(category) {
            if !modifier.delta.is_finite() || !modifier.when.matches(context) {
                continue;
            }
            final_score += modifier.delta;
            reasons.push(Reason::new(category, &modifier.label, modifier.delta));
            if let Some(warning) = &modifier.warning {
                warnings.push(warning.clone());
            }
        }
    }

    let final_score = clamp_score(final_score);
    let is_personalized = !reasons.is_empty() || !warnings.is_empty();

    RelevanceScoreResult {
        base_score,
        final_score,
        reasons,
        warnings,
        is_personalized,
        tier: config.thresholds.tier_for(final_score),
    }
}

fn baseline(base_score: Score, config: &ScorerConfig) -> RelevanceScoreResult {
    RelevanceScoreResult {
        base_score,
        final_score: base_score,
        reasons: Vec::new(),
        warnings: Vec::new(),
        is_personalized: false,
        tier: config.thresholds.tier_for(base_score),
    }
}

fn clamp_score(score: Score) -> Score {
    if score.is_nan() {
        MIN_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}
