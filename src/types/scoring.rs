use super::matrix::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Score = f32;

pub const MIN_SCORE: Score = 0.0;
pub const MAX_SCORE: Score = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Essential,
    Optimizer,
    Niche,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Optimizer => "optimizer",
            Self::Niche => "niche",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn of(delta: Score) -> Self {
        if delta > 0.0 {
            Self::Positive
        } else if delta < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub category: Category,
    pub label: String,
    pub delta: Score,
    pub polarity: Polarity,
}

impl Reason {
    pub fn new(category: Category, label: &str, delta: Score) -> Self {
        Self {
            category,
            label: label.to_string(),
            delta,
            polarity: Polarity::of(delta),
        }
    }
}

/// Renders as `"<label>: +X.X"` or `"<label>: -X.X"`.
impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.polarity {
            Polarity::Negative => '-',
            Polarity::Positive | Polarity::Neutral => '+',
        };
        write!(f, "{}: {}{:.1}", self.label, sign, self.delta.abs())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceScoreResult {
    pub base_score: Score,
    pub final_score: Score,
    pub reasons: Vec<Reason>,
    pub warnings: Vec<String>,
    pub is_personalized: bool,
    pub tier: Tier,
}

impl RelevanceScoreResult {
    pub fn reason_strings(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }

    /// Reasons grouped by category, in the order the categories first appear.
    pub fn reasons_by_category(&self) -> Vec<(Category, Vec<&Reason>)> {
        let mut groups: Vec<(Category, Vec<&Reason>)> = Vec::new();
        for reason in &self.reasons {
            match groups
                .iter_mut()
                .find(|(category, _)| *category == reason.category)
            {
                Some((_, members)) => members.push(reason),
                None => groups.push((reason.category, vec![reason])),
            }
        }
        groups
    }

    pub fn delta(&self) -> Score {
        self.final_score - self.base_score
    }
}
