//! Error handling

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiagnosisError>;

#[derive(Debug, Error)]
pub enum DiagnosisError {
    // Startup errors
    #[error("artifact {} is missing or corrupt: {reason}", path.display())]
    MissingArtifact { path: PathBuf, reason: String },

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("dataset row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("invalid feature columns: {0}")]
    InvalidLayout(String),

    #[error("invalid species encoder: {0}")]
    InvalidEncoder(String),

    #[error("unsupported artifact format {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    #[error("feature layout mismatch: expected hash {expected:08x}, got {actual:08x}")]
    LayoutMismatch { expected: u32, actual: u32 },

    #[error("disease catalog {}: {reason}", path.display())]
    InvalidCatalog { path: PathBuf, reason: String },

    // Request errors
    #[error("unknown pet type '{0}'")]
    UnknownCategory(String),

    #[error("unknown symptom '{0}'")]
    UnknownSymptom(String),

    #[error("no symptoms selected")]
    EmptySelection,

    #[error("classifier error: {0}")]
    Classifier(String),

    // Wrapped errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Predicted label with no disease catalog entry.
///
/// Never propagated past the predictor: it is recovered with placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no catalog entry for disease '{0}'")]
pub struct UnmappedLabel(pub String);
