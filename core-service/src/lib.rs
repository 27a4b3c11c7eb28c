//! Pet Disease App - Core Service
//!
//! Everything the trainer and the web UI share:
//!
//! ```text
//! pet_disease.csv ──► dataset ──► trainer ──► artifacts (pet_model / le_pet / feature_columns)
//!                                                  │
//!   species + symptoms ──► predictor: encode ──► predict ──► resolve (catalog, triage)
//! ```
//!
//! - `logic::dataset` - CSV loading and validation
//! - `logic::features` - species encoder, frozen feature layout, fixed-shape vectors
//! - `logic::model` - classifier capability and the random forest implementation
//! - `logic::artifacts` - serialized training outputs
//! - `logic::disease` - disease catalog and triage guidance
//! - `logic::trainer` / `logic::predictor` - the two pipelines

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{DiagnosisError, Result, UnmappedLabel};
pub use logic::artifacts::{ArtifactBundle, ArtifactStore, ModelArtifact, ModelInfo};
pub use logic::dataset::{Dataset, DatasetRecord};
pub use logic::disease::{ContactGuidance, DiseaseCatalog, DiseaseInfo, Severity, Triage};
pub use logic::features::{FeatureLayout, FeatureVector, SpeciesEncoder};
pub use logic::model::{Classifier, ForestConfig, RandomForest};
pub use logic::predictor::{Diagnosis, Predictor};
pub use logic::trainer::{TrainerConfig, TrainingReport};
