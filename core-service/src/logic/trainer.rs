//! Trainer - Dataset to artifacts
//!
//! 1. Fit the species encoder over the distinct species values
//! 2. Replace the species column by its code
//! 3. Fit the classifier on every non-label column
//! 4. Persist classifier, encoder and ordered feature columns
//!
//! Same dataset + same seed => same classifier.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use crate::constants::{get_artifact_dir, get_catalog_path, get_dataset_path, ARTIFACT_FORMAT_VERSION};
use crate::error::Result;
use crate::logic::artifacts::{ArtifactBundle, ArtifactStore, ModelArtifact};
use crate::logic::dataset::Dataset;
use crate::logic::disease::DiseaseCatalog;
use crate::logic::features::{FeatureLayout, SpeciesEncoder};
use crate::logic::model::{Classifier, ForestConfig, RandomForest};

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub dataset_path: PathBuf,
    pub artifact_dir: PathBuf,
    /// `None` uses the built-in disease catalog for the vocabulary audit
    pub catalog_path: Option<PathBuf>,
    pub forest: ForestConfig,
}

impl TrainerConfig {
    pub fn from_env() -> Self {
        Self {
            dataset_path: get_dataset_path(),
            artifact_dir: get_artifact_dir(),
            catalog_path: get_catalog_path(),
            forest: ForestConfig::from_env(),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Summary of one training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub species: Vec<String>,
    pub symptom_count: usize,
    pub classes: Vec<String>,
    /// Accuracy on the training rows themselves
    pub training_accuracy: f64,
    pub dataset_sha256: Option<String>,
    /// Dataset diseases with no catalog entry
    pub unmapped_diseases: Vec<String>,
}

// ============================================================================
// TRAINING
// ============================================================================

/// Fit `classifier` on `dataset` and package the three artifacts.
pub fn fit_artifacts<C: Classifier>(
    dataset: &Dataset,
    mut classifier: C,
) -> Result<(ArtifactBundle<C>, TrainingReport)> {
    let encoder = SpeciesEncoder::fit(dataset.records().iter().map(|r| r.pet_type.as_str()))?;
    let layout = FeatureLayout::new(dataset.feature_columns().to_vec())?;

    let samples = dataset.feature_matrix(&encoder)?;
    let labels = dataset.labels();
    classifier.fit(&samples, &labels)?;

    let mut correct = 0usize;
    for (row, label) in samples.iter().zip(&labels) {
        if classifier.predict(row)? == *label {
            correct += 1;
        }
    }

    let report = TrainingReport {
        rows: dataset.len(),
        species: encoder.classes().to_vec(),
        symptom_count: layout.symptom_count(),
        classes: dataset.diseases(),
        training_accuracy: correct as f64 / samples.len() as f64,
        dataset_sha256: dataset.digest().map(str::to_string),
        unmapped_diseases: Vec::new(),
    };

    let bundle = ArtifactBundle {
        model: ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            trained_at: Utc::now(),
            dataset_sha256: report.dataset_sha256.clone(),
            layout_hash: layout.hash(),
            classifier,
        },
        encoder,
        layout,
    };

    Ok((bundle, report))
}

/// Full trainer run: load, fit, audit, save.
pub fn run(config: &TrainerConfig) -> Result<TrainingReport> {
    let dataset = Dataset::load(&config.dataset_path)?;
    let catalog = DiseaseCatalog::load_or_builtin(config.catalog_path.as_deref())?;

    log::info!(
        "Training random forest ({} trees, seed {})",
        config.forest.n_estimators,
        config.forest.seed
    );
    let (bundle, mut report) = fit_artifacts(&dataset, RandomForest::new(config.forest.clone()))?;
    let forest = &bundle.model.classifier;
    log::info!("Forest fitted: {} trees over {} classes", forest.n_trees(), forest.classes().len());

    report.unmapped_diseases = catalog.audit(&report.classes);
    for label in &report.unmapped_diseases {
        log::warn!("Disease '{}' has no catalog entry; it will show placeholder text", label);
    }

    ArtifactStore::new(&config.artifact_dir).save(&bundle)?;

    log::info!(
        "Training complete: {} rows, {} species, {} symptoms, {} classes, accuracy {:.3}",
        report.rows,
        report.species.len(),
        report.symptom_count,
        report.classes.len(),
        report.training_accuracy
    );
    Ok(report)
}
