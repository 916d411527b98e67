use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    MuscleGain,
    FatLoss,
    Longevity,
    Performance,
    GeneralHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "under_30")]
    Under30,
    #[serde(rename = "30_44")]
    From30To44,
    #[serde(rename = "45_59")]
    From45To59,
    #[serde(rename = "60_plus")]
    SixtyPlus,
}

impl AgeBracket {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=29 => Self::Under30,
            30..=44 => Self::From30To44,
            45..=59 => Self::From45To59,
            _ => Self::SixtyPlus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeptidePhase {
    Loading,
    Maintenance,
    Washout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolFlags {
    pub on_trt: bool,
    pub natural: bool,
    pub on_glp1: bool,
    pub peptide_phase: Option<PeptidePhase>,
}

/// Snapshot of the user state that personalizes scoring.
///
/// Every field is optional; an absent field simply means no modifier
/// keyed on it can match. Bloodwork flags and protocol names are stored
/// normalized (trimmed, lowercase).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRelevanceContext {
    pub goal: Option<Goal>,
    pub age_bracket: Option<AgeBracket>,
    pub sex: Option<Sex>,
    pub protocol: ProtocolFlags,
    pub bloodwork_flags: BTreeSet<String>,
    pub active_protocols: BTreeSet<String>,
}

pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl UserRelevanceContext {
    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_bloodwork_flag(mut self, flag: &str) -> Self {
        self.add_bloodwork_flag(flag);
        self
    }

    pub fn with_active_protocol(mut self, name: &str) -> Self {
        self.add_active_protocol(name);
        self
    }

    pub fn add_bloodwork_flag(&mut self, flag: &str) {
        let normalized = normalize_key(flag);
        if !normalized.is_empty() {
            self.bloodwork_flags.insert(normalized);
        }
    }

    pub fn add_active_protocol(&mut self, name: &str) {
        let normalized = normalize_key(name);
        if !normalized.is_empty() {
            self.active_protocols.insert(normalized);
        }
    }

    pub fn has_bloodwork_flag(&self, marker: &str) -> bool {
        self.bloodwork_flags.contains(&normalize_key(marker))
    }

    pub fn has_active_protocol(&self, name: &str) -> bool {
        self.active_protocols.contains(&normalize_key(name))
    }
}
