use crate::error::{Result, StackError};
use crate::types::matrix::{Condition, RelevanceMatrix};
use crate::types::scoring::{Score, MAX_SCORE, MIN_SCORE};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub impact_score: Score,
    #[serde(default)]
    pub modifiers: RelevanceMatrix,
}

impl Supplement {
    pub fn matrix(&self) -> Option<&RelevanceMatrix> {
        if self.modifiers.is_empty() {
            None
        } else {
            Some(&self.modifiers)
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "supplement")]
    supplements: Vec<Supplement>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub supplements: Vec<Supplement>,
    pub sources: Vec<PathBuf>,
    /// Hex SHA-256 over the source files, in load order.
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
}

impl Finding {
    fn blocking(id: &str, title: &str, body: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body,
            blocking: true,
        }
    }

    fn warning(id: &str, title: &str, body: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body,
            blocking: false,
        }
    }
}

/// Loads a catalog from a single TOML file or from every `.toml` file under a directory.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(StackError::PathNotFound(path.display().to_string()));
    }

    let sources = if path.is_dir() {
        collect_toml_files(path)?
    } else {
        vec![path.to_path_buf()]
    };
    if sources.is_empty() {
        return Err(StackError::EmptyCatalog(path.display().to_string()));
    }

    let mut hasher = Sha256::new();
    let mut supplements = Vec::new();
    for source in &sources {
        let content = std::fs::read_to_string(source)?;
        hasher.update(content.as_bytes());
        let file: CatalogFile = toml::from_str(&content)
            .map_err(|e| StackError::CatalogParse(format!("{}: {}", source.display(), e)))?;
        tracing::debug!(
            source = %source.display(),
            count = file.supplements.len(),
            "loaded catalog file"
        );
        supplements.extend(file.supplements);
    }

    if supplements.is_empty() {
        return Err(StackError::EmptyCatalog(path.display().to_string()));
    }

    let digest = hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<String>();

    Ok(Catalog {
        supplements,
        sources,
        digest,
    })
}

fn collect_toml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|ext| ext.to_str()) == Some("toml")
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

impl Catalog {
    pub fn find(&self, id: &str) -> Result<&Supplement> {
        let wanted = id.trim();
        self.supplements
            .iter()
            .find(|supplement| supplement.id.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StackError::UnknownSupplement(wanted.to_string()))
    }

    pub fn lint(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut seen = HashSet::new();

        for supplement in &self.supplements {
            let id = supplement.id.trim();
            if id.is_empty() {
                findings.push(Finding::blocking(
                    "catalog.empty_id",
                    "Supplement without id",
                    format!("Supplement '{}' has an empty id.", supplement.name),
                ));
            } else if !seen.insert(id.to_lowercase()) {
                findings.push(Finding::blocking(
                    "catalog.duplicate_id",
                    "Duplicate supplement id",
                    format!("Supplement id '{id}' is defined more than once."),
                ));
            }

            if !supplement.impact_score.is_finite() {
                findings.push(Finding::blocking(
                    "catalog.invalid_impact",
                    "Impact score is not a number",
                    format!("Supplement '{id}' has a non-finite impact_score."),
                ));
            } else if !(MIN_SCORE..=MAX_SCORE).contains(&supplement.impact_score) {
                findings.push(Finding::warning(
                    "catalog.impact_out_of_range",
                    "Impact score outside 0-10",
                    format!(
                        "Supplement '{id}' has impact_score {:.2}; it will be clamped.",
                        supplement.impact_score
                    ),
                ));
            }

            for (index, modifier) in supplement.modifiers.modifiers.iter().enumerate() {
                let at = format!("{id}.modifiers[{index}]");
                if !modifier.delta.is_finite() {
                    findings.push(Finding::blocking(
                        "matrix.invalid_delta",
                        "Modifier delta is not a number",
                        format!("{at} has a non-finite delta and is ignored when scoring."),
                    ));
                } else if modifier.delta.abs() > MAX_SCORE - MIN_SCORE {
                    findings.push(Finding::warning(
                        "matrix.delta_out_of_range",
                        "Modifier delta exceeds the score range",
                        format!(
                            "{at} has delta {:.1}; any match pins the score to a bound.",
                            modifier.delta
                        ),
                    ));
                }
                if modifier.label.trim().is_empty() {
                    findings.push(Finding::blocking(
                        "matrix.empty_label",
                        "Modifier without label",
                        format!("{at} has an empty label."),
                    ));
                }
                match &modifier.when {
                    Condition::Demographic(demographic) if demographic.is_empty() => {
                        findings.push(Finding::blocking(
                            "matrix.empty_demographic",
                            "Demographic modifier never matches",
                            format!("{at} sets neither age nor sex."),
                        ));
                    }
                    Condition::Bloodwork(name) | Condition::Synergy(name)
                        if name.trim().is_empty() =>
                    {
                        findings.push(Finding::blocking(
                            "matrix.empty_key",
                            "Modifier keyed on an empty name",
                            format!("{at} has an empty {} key.", modifier.when.category()),
                        ));
                    }
                    _ => {}
                }
                match &modifier.warning {
                    Some(warning) if warning.trim().is_empty() => {
                        findings.push(Finding::warning(
                            "matrix.empty_warning",
                            "Empty warning text",
                            format!("{at} is flagged as a warning but has no text."),
                        ));
                    }
                    None if modifier.delta == 0.0 => {
                        findings.push(Finding::warning(
                            "matrix.zero_delta",
                            "Modifier has no effect",
                            format!("{at} has a zero delta and no warning."),
                        ));
                    }
                    _ => {}
                }
            }
        }

        findings
    }
}
