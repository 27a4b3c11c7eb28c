//! Artifacts - Serialized Training Outputs
//!
//! Three JSON files in one directory:
//! - `pet_model.json` - fitted classifier plus training metadata
//! - `le_pet.json` - species encoder
//! - `feature_columns.json` - ordered feature-column list
//!
//! Each file is written to a `.tmp` sibling and renamed into place, so a
//! reader never sees half a file. Loading checks the three files against
//! each other; any problem is reported as `MissingArtifact`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{ARTIFACT_FORMAT_VERSION, ENCODER_FILE, FEATURE_COLUMNS_FILE, MODEL_FILE};
use crate::error::{DiagnosisError, Result};
use crate::logic::features::{FeatureLayout, LayoutInfo, SpeciesEncoder};
use crate::logic::model::{Classifier, RandomForest};

// ============================================================================
// MODEL ARTIFACT
// ============================================================================

/// Fitted classifier with the metadata needed to trust it on load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact<C = RandomForest> {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    /// SHA-256 of the training CSV, when it came from a file
    pub dataset_sha256: Option<String>,
    /// Hash of the feature-column list the classifier was fitted on
    pub layout_hash: u32,
    pub classifier: C,
}

/// Metadata-only view for health output and logs
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub dataset_sha256: Option<String>,
    pub layout: LayoutInfo,
    pub species: Vec<String>,
}

// ============================================================================
// BUNDLE
// ============================================================================

/// The three artifacts, in memory
#[derive(Debug, Clone)]
pub struct ArtifactBundle<C = RandomForest> {
    pub model: ModelArtifact<C>,
    pub encoder: SpeciesEncoder,
    pub layout: FeatureLayout,
}

impl<C> ModelArtifact<C> {
    pub fn check_format(&self) -> Result<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(DiagnosisError::UnsupportedFormat {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }
        Ok(())
    }
}

impl<C: Classifier> ArtifactBundle<C> {
    /// Cross-check the three artifacts.
    pub fn verify(&self) -> Result<()> {
        self.model.check_format()?;
        self.encoder.check()?;
        self.layout.validate(self.model.layout_hash)?;
        self.model.classifier.check()?;

        match self.model.classifier.n_features() {
            Some(n) if n == self.layout.len() => Ok(()),
            Some(n) => Err(DiagnosisError::InvalidLayout(format!(
                "classifier expects {} features, column list has {}",
                n,
                self.layout.len()
            ))),
            None => Err(DiagnosisError::Classifier("classifier is not fitted".to_string())),
        }
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            format_version: self.model.format_version,
            trained_at: self.model.trained_at,
            dataset_sha256: self.model.dataset_sha256.clone(),
            layout: self.layout.info(),
            species: self.encoder.classes().to_vec(),
        }
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Reads and writes the artifact files in one directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn encoder_path(&self) -> PathBuf {
        self.dir.join(ENCODER_FILE)
    }

    pub fn columns_path(&self) -> PathBuf {
        self.dir.join(FEATURE_COLUMNS_FILE)
    }

    /// All three files present
    pub fn exists(&self) -> bool {
        self.model_path().is_file() && self.encoder_path().is_file() && self.columns_path().is_file()
    }

    /// Replace all three artifacts.
    pub fn save<C: Serialize>(&self, bundle: &ArtifactBundle<C>) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let files = [
            (self.model_path(), serde_json::to_vec(&bundle.model)?),
            (self.encoder_path(), serde_json::to_vec_pretty(&bundle.encoder)?),
            (self.columns_path(), serde_json::to_vec_pretty(bundle.layout.columns())?),
        ];

        let mut staged = Vec::with_capacity(files.len());
        if let Err(err) = stage_and_commit(files, &mut staged) {
            // Renamed files are already gone from their tmp path
            for (tmp, _) in &staged {
                let _ = std::fs::remove_file(tmp);
            }
            return Err(err);
        }

        log::info!(
            "Artifacts saved to {} (layout {:08x})",
            self.dir.display(),
            bundle.layout.hash()
        );
        Ok(())
    }

    /// Load and cross-check all three artifacts.
    pub fn load<C>(&self) -> Result<ArtifactBundle<C>>
    where
        C: Classifier + DeserializeOwned,
    {
        let model_path = self.model_path();
        let model: ModelArtifact<C> = read_json(&model_path)?;
        model.check_format().map_err(|e| missing(&model_path, e))?;

        // Deserializing validates the class list
        let encoder: SpeciesEncoder = read_json(&self.encoder_path())?;

        let columns_path = self.columns_path();
        let columns: Vec<String> = read_json(&columns_path)?;
        let layout = FeatureLayout::new(columns).map_err(|e| missing(&columns_path, e))?;

        let bundle = ArtifactBundle {
            model,
            encoder,
            layout,
        };
        bundle.verify().map_err(|e| missing(&model_path, e))?;

        log::info!(
            "Artifacts loaded from {} ({} features, {} species, layout {:08x})",
            self.dir.display(),
            bundle.layout.len(),
            bundle.encoder.len(),
            bundle.layout.hash()
        );
        Ok(bundle)
    }
}

/// Write every file to its `.tmp` sibling, then rename them all into place.
/// `staged` lists every tmp file attempted so far.
fn stage_and_commit(
    files: [(PathBuf, Vec<u8>); 3],
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<()> {
    for (path, bytes) in files {
        let tmp = tmp_path(&path);
        staged.push((tmp.clone(), path));
        std::fs::write(&tmp, bytes)?;
    }
    for (tmp, path) in staged.iter() {
        std::fs::rename(tmp, path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn missing(path: &Path, reason: impl ToString) -> DiagnosisError {
    DiagnosisError::MissingArtifact {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|e| missing(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| missing(path, e))
}
