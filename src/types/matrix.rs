use super::context::{AgeBracket, Goal, PeptidePhase, Sex, UserRelevanceContext};
use super::scoring::Score;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition categories, in the order they are evaluated by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Goal,
    Demographic,
    Protocol,
    Bloodwork,
    Synergy,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Goal,
        Category::Demographic,
        Category::Protocol,
        Category::Bloodwork,
        Category::Synergy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Demographic => "demographic",
            Self::Protocol => "protocol",
            Self::Bloodwork => "bloodwork",
            Self::Synergy => "synergy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolMode {
    Trt,
    Natural,
    Glp1,
    PeptidePhase(PeptidePhase),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicMatch {
    pub age: Option<AgeBracket>,
    pub sex: Option<Sex>,
}

impl DemographicMatch {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.sex.is_none()
    }
}

/// When a modifier applies. Written in TOML as a single-key table, e.g.
/// `when = { goal = "fat_loss" }` or `when = { protocol = { peptide_phase = "loading" } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Goal(Goal),
    Demographic(DemographicMatch),
    Protocol(ProtocolMode),
    Bloodwork(String),
    Synergy(String),
}

impl Condition {
    pub fn category(&self) -> Category {
        match self {
            Self::Goal(_) => Category::Goal,
            Self::Demographic(_) => Category::Demographic,
            Self::Protocol(_) => Category::Protocol,
            Self::Bloodwork(_) => Category::Bloodwork,
            Self::Synergy(_) => Category::Synergy,
        }
    }

    pub fn matches(&self, context: &UserRelevanceContext) -> bool {
        match self {
            Self::Goal(goal) => context.goal == Some(*goal),
            Self::Demographic(demographic) => {
                if demographic.is_empty() {
                    return false;
                }
                let age_ok = demographic
                    .age
                    .map(|age| context.age_bracket == Some(age))
                    .unwrap_or(true);
                let sex_ok = demographic
                    .sex
                    .map(|sex| context.sex == Some(sex))
                    .unwrap_or(true);
                age_ok && sex_ok
            }
            Self::Protocol(mode) => match mode {
                ProtocolMode::Trt => context.protocol.on_trt,
                ProtocolMode::Natural => context.protocol.natural,
                ProtocolMode::Glp1 => context.protocol.on_glp1,
                ProtocolMode::PeptidePhase(phase) => context.protocol.peptide_phase == Some(*phase),
            },
            Self::Bloodwork(marker) => context.has_bloodwork_flag(marker),
            Self::Synergy(protocol) => context.has_active_protocol(protocol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub when: Condition,
    pub delta: Score,
    pub label: String,
    /// Set on entries that flag a risky combination; emitted as a warning
    /// alongside the regular reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Modifier {
    pub fn new(when: Condition, delta: Score, label: &str) -> Self {
        Self {
            when,
            delta,
            label: label.to_string(),
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warning = Some(warning.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelevanceMatrix {
    pub modifiers: Vec<Modifier>,
}

impl RelevanceMatrix {
    pub fn new(modifiers: Vec<Modifier>) -> Self {
        Self { modifiers }
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Modifier> {
        self.modifiers
            .iter()
            .filter(move |modifier| modifier.when.category() == category)
    }
}
