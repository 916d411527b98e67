use crate::error::{Result, StackError};
use crate::types::context::{
    normalize_key, AgeBracket, Goal, PeptidePhase, ProtocolFlags, Sex, UserRelevanceContext,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub goal: Option<Goal>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub on_trt: bool,
    pub natural: bool,
    pub on_glp1: bool,
    pub peptide_phase: Option<PeptidePhase>,
    pub active_protocols: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabRecord {
    pub marker: String,
    pub value: f64,
    pub ref_low: Option<f64>,
    pub ref_high: Option<f64>,
    pub measured_at: NaiveDate,
}

impl LabRecord {
    /// `low_<marker>` / `high_<marker>` when outside the reference range.
    pub fn flag(&self) -> Option<String> {
        let marker = normalize_key(&self.marker);
        if marker.is_empty() || !self.value.is_finite() {
            return None;
        }
        if self.ref_low.is_some_and(|low| self.value < low) {
            Some(format!("low_{marker}"))
        } else if self.ref_high.is_some_and(|high| self.value > high) {
            Some(format!("high_{marker}"))
        } else {
            None
        }
    }
}

/// On-disk user snapshot: profile, lab history and manually set flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContextFile {
    pub profile: Option<Profile>,
    pub labs: Vec<LabRecord>,
    pub flags: Vec<String>,
}

pub fn load_context_file(path: &Path) -> Result<ContextFile> {
    if !path.exists() {
        return Err(StackError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| StackError::ContextParse(format!("{}: {}", path.display(), e)))
}

pub fn load_context(path: &Path) -> Result<UserRelevanceContext> {
    let file = load_context_file(path)?;
    Ok(derive_context(file.profile.as_ref(), &file.labs, &file.flags))
}

/// Projects profile and lab data onto a scoring context. Only the most
/// recent record of each marker is considered.
pub fn derive_context(
    profile: Option<&Profile>,
    labs: &[LabRecord],
    extra_flags: &[String],
) -> UserRelevanceContext {
    let mut context = UserRelevanceContext::default();

    if let Some(profile) = profile {
        context.goal = profile.goal;
        context.sex = profile.sex;
        context.age_bracket = profile.age.map(AgeBracket::from_age);
        context.protocol = ProtocolFlags {
            on_trt: profile.on_trt,
            natural: profile.natural,
            on_glp1: profile.on_glp1,
            peptide_phase: profile.peptide_phase,
        };
        for name in &profile.active_protocols {
            context.add_active_protocol(name);
        }
        if profile.on_trt && profile.natural {
            tracing::warn!("profile sets both on_trt and natural; keeping both flags");
        }
    }

    for record in latest_per_marker(labs).into_values() {
        if let Some(flag) = record.flag() {
            tracing::debug!(marker = %record.marker, %flag, "bloodwork flag raised");
            context.add_bloodwork_flag(&flag);
        }
    }
    for flag in extra_flags {
        context.add_bloodwork_flag(flag);
    }

    context
}

fn latest_per_marker(labs: &[LabRecord]) -> BTreeMap<String, &LabRecord> {
    let mut latest: BTreeMap<String, &LabRecord> = BTreeMap::new();
    for record in labs {
        let key = normalize_key(&record.marker);
        let newer = latest
            .get(&key)
            .map_or(true, |current| record.measured_at > current.measured_at);
        if newer {
            latest.insert(key, record);
        }
    }
    latest
}
