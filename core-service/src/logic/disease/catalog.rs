//! Disease Catalog
//!
//! Label -> description + severity tier. Ships with a built-in table and
//! can be replaced by a JSON file:
//!
//! ```text
//! {
//!   "Parvovirus": { "description": "...", "severity": "emergency" },
//!   "Generic Infection": { "description": "..." }
//! }
//! ```
//!
//! A missing `severity` means `standard`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::triage::Triage;
use crate::constants::NO_DESCRIPTION;
use crate::error::{DiagnosisError, Result, UnmappedLabel};

/// Severity tier of a disease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Emergency,
    #[default]
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseInfo {
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
}

impl DiseaseInfo {
    pub fn new(description: impl Into<String>, severity: Severity) -> Self {
        Self {
            description: description.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseCatalog {
    entries: BTreeMap<String, DiseaseInfo>,
}

impl DiseaseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table for the diseases the bundled dataset uses
    pub fn builtin() -> Self {
        use Severity::{Emergency, Standard};

        let rows = [
            (
                "Parvovirus",
                "Viral disease causing severe diarrhoea and vomiting in dogs. \
                 Treatment: hospital care and fluid therapy.",
                Emergency,
            ),
            (
                "Canine Influenza",
                "Contagious respiratory virus in dogs. Signs: fever, difficulty breathing. \
                 Treatment: supportive care and isolation.",
                Emergency,
            ),
            (
                "Feline Flu",
                "Common upper respiratory viral disease in cats. Treatment: supportive care, \
                 fluids, and antibiotics for secondary infections.",
                Emergency,
            ),
            (
                "Feline Panleukopenia",
                "Highly contagious viral disease. Treatment: hospital care, fluids and supportive care.",
                Emergency,
            ),
            (
                "Foot & Mouth",
                "Viral disease of cattle causing foot lesions and lameness. \
                 Treatment: veterinary advice and isolation.",
                Standard,
            ),
            (
                "Bovine Viral Diarrhea",
                "Fever and heavy diarrhoea in cattle. Treatment: supportive care and veterinary advice.",
                Standard,
            ),
            (
                "Generic Infection",
                "A non-specific infection without a dedicated entry for this species. \
                 Treatment: follow veterinary guidance.",
                Standard,
            ),
            (
                "Unknown Virus",
                "An unidentified viral infection. Treatment: veterinary advice.",
                Standard,
            ),
        ];

        let mut catalog = Self::new();
        for (label, description, severity) in rows {
            catalog.insert(label, DiseaseInfo::new(description, severity));
        }
        catalog
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| DiagnosisError::InvalidCatalog {
            path: path.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let catalog = Self::from_json(&content).map_err(|e| invalid(e.to_string()))?;

        log::info!("Disease catalog loaded from {} ({} entries)", path.display(), catalog.len());
        Ok(catalog)
    }

    /// File catalog when configured, built-in otherwise
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn insert(&mut self, label: impl Into<String>, info: DiseaseInfo) {
        self.entries.insert(label.into(), info);
    }

    pub fn lookup(&self, label: &str) -> std::result::Result<&DiseaseInfo, UnmappedLabel> {
        self.entries
            .get(label)
            .ok_or_else(|| UnmappedLabel(label.to_string()))
    }

    /// Description, or the placeholder for unmapped labels
    pub fn describe(&self, label: &str) -> &str {
        self.lookup(label)
            .map(|info| info.description.as_str())
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Triage for a label; unmapped labels are standard.
    pub fn triage(&self, label: &str) -> Triage {
        self.lookup(label)
            .map(|info| Triage::from(info.severity))
            .unwrap_or(Triage::Standard)
    }

    pub fn emergency_labels(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, info)| info.severity == Severity::Emergency)
            .map(|(label, _)| label.as_str())
            .collect()
    }

    /// Labels with no catalog entry, sorted and distinct
    pub fn audit<I, S>(&self, labels: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut missing: Vec<String> = labels
            .into_iter()
            .filter(|l| !self.entries.contains_key(l.as_ref()))
            .map(|l| l.as_ref().to_string())
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_emergency_set() {
        let catalog = DiseaseCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.emergency_labels(),
            vec!["Canine Influenza", "Feline Flu", "Feline Panleukopenia", "Parvovirus"]
        );
    }

    #[test]
    fn test_triage_branches() {
        let catalog = DiseaseCatalog::builtin();
        for label in ["Parvovirus", "Canine Influenza", "Feline Flu", "Feline Panleukopenia"] {
            assert_eq!(catalog.triage(label), Triage::Emergency, "{}", label);
        }
        for label in ["Foot & Mouth", "Bovine Viral Diarrhea", "Generic Infection", "Unknown Virus"] {
            assert_eq!(catalog.triage(label), Triage::Standard, "{}", label);
        }
    }

    #[test]
    fn test_unmapped_label_degrades() {
        let catalog = DiseaseCatalog::builtin();
        assert_eq!(catalog.lookup("Rabies"), Err(UnmappedLabel("Rabies".to_string())));
        assert_eq!(catalog.describe("Rabies"), NO_DESCRIPTION);
        assert_eq!(catalog.triage("Rabies"), Triage::Standard);
    }

    #[test]
    fn test_audit_reports_missing_labels() {
        let catalog = DiseaseCatalog::builtin();
        let missing = catalog.audit(["Parvovirus", "Rabies", "Mange", "Rabies"]);
        assert_eq!(missing, vec!["Mange", "Rabies"]);
        assert!(catalog.audit(["Feline Flu"]).is_empty());
    }

    #[test]
    fn test_json_catalog_default_severity() {
        let json = r#"{
            "Rabies": { "description": "Fatal viral disease.", "severity": "emergency" },
            "Mange": { "description": "Skin mites." }
        }"#;
        let catalog = DiseaseCatalog::from_json(json).unwrap();
        assert_eq!(catalog.triage("Rabies"), Triage::Emergency);
        assert_eq!(catalog.triage("Mange"), Triage::Standard);
        assert_eq!(catalog.describe("Mange"), "Skin mites.");
    }

    #[test]
    fn test_load_file_and_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diseases.json");
        std::fs::write(&path, serde_json::to_string(&DiseaseCatalog::builtin()).unwrap()).unwrap();

        let loaded = DiseaseCatalog::load(&path).unwrap();
        assert_eq!(loaded, DiseaseCatalog::builtin());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            DiseaseCatalog::load(&path),
            Err(DiagnosisError::InvalidCatalog { .. })
        ));
        assert!(DiseaseCatalog::load(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_load_or_builtin() {
        assert_eq!(DiseaseCatalog::load_or_builtin(None).unwrap(), DiseaseCatalog::builtin());
    }
}
