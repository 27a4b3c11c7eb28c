//! Central Configuration Constants
//!
//! Single source of truth for file names, column names and defaults.
//! Every default can be overridden from the environment (or a `.env` file).

use std::path::PathBuf;

/// App name
pub const APP_NAME: &str = "Pet Disease App";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// DATASET CONTRACT
// ============================================================================

/// Categorical species column
pub const SPECIES_COLUMN: &str = "Pet_Type";

/// Label column
pub const LABEL_COLUMN: &str = "Disease";

/// Default dataset location (relative to the working directory)
pub const DEFAULT_DATASET_PATH: &str = "pet_disease.csv";

// ============================================================================
// ARTIFACTS
// ============================================================================

/// Default artifact directory
pub const DEFAULT_ARTIFACT_DIR: &str = ".";

/// Fitted classifier
pub const MODEL_FILE: &str = "pet_model.json";

/// Fitted species encoder
pub const ENCODER_FILE: &str = "le_pet.json";

/// Ordered feature-column list
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";

/// Bumped whenever the artifact JSON shape changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

// ============================================================================
// TRAINING
// ============================================================================

/// Trees in the forest
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Seed for bootstrap and feature sampling
pub const DEFAULT_RANDOM_SEED: u64 = 42;

// ============================================================================
// GUIDANCE
// ============================================================================

/// Shown when a predicted disease has no catalog entry
pub const NO_DESCRIPTION: &str = "No description available.";

/// Veterinary hotline placeholder
pub const VET_PHONE: &str = "071-XXXXXXX";

/// External clinic search
pub const CLINIC_MAP_URL: &str = "https://www.google.com/maps/search/veterinary+clinic+near+me";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Dataset path from `DATASET_PATH` or default
pub fn get_dataset_path() -> PathBuf {
    std::env::var("DATASET_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH))
}

/// Artifact directory from `ARTIFACT_DIR` or default
pub fn get_artifact_dir() -> PathBuf {
    std::env::var("ARTIFACT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_DIR))
}

/// Optional disease catalog override (`DISEASE_CATALOG_PATH`)
pub fn get_catalog_path() -> Option<PathBuf> {
    std::env::var("DISEASE_CATALOG_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Number of trees from `N_ESTIMATORS` or default
pub fn get_n_estimators() -> usize {
    std::env::var("N_ESTIMATORS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_N_ESTIMATORS)
}

/// Random seed from `RANDOM_SEED` or default
pub fn get_random_seed() -> u64 {
    std::env::var("RANDOM_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RANDOM_SEED)
}
