//! Feature Layout - Frozen Feature Column Order
//!
//! **The column list written by the trainer is the schema.**
//!
//! ## Rules (NEVER break these):
//! 1. Column order comes from the `feature_columns` artifact, never from the dataset
//! 2. Positions are resolved once, when the layout is built
//! 3. A model is only usable with the layout hash it was trained against

use std::collections::HashMap;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::constants::{LABEL_COLUMN, SPECIES_COLUMN};
use crate::error::{DiagnosisError, Result};

// ============================================================================
// LAYOUT VERSION
// ============================================================================

/// Current layout hashing scheme
/// MUST be incremented when the hash input changes
pub const LAYOUT_VERSION: u8 = 1;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of an ordered column list
pub fn compute_layout_hash<S: AsRef<str>>(columns: &[S]) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[LAYOUT_VERSION]);

    for name in columns {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Resolved feature layout: column order plus precomputed positions.
#[derive(Debug, Clone)]
pub struct FeatureLayout {
    columns: Vec<String>,
    species_index: usize,
    symptom_index: HashMap<String, usize>,
    hash: u32,
}

impl FeatureLayout {
    /// Resolve a column list.
    ///
    /// Requires exactly one species column, at least one symptom column,
    /// no label column and no duplicates.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.iter().any(|c| c == LABEL_COLUMN) {
            return Err(DiagnosisError::InvalidLayout(format!(
                "label column '{}' cannot be a feature",
                LABEL_COLUMN
            )));
        }

        let mut species_index = None;
        let mut symptom_index = HashMap::with_capacity(columns.len());

        for (i, name) in columns.iter().enumerate() {
            if name == SPECIES_COLUMN {
                if species_index.replace(i).is_some() {
                    return Err(DiagnosisError::InvalidLayout(format!(
                        "duplicate column '{}'",
                        name
                    )));
                }
            } else if symptom_index.insert(name.clone(), i).is_some() {
                return Err(DiagnosisError::InvalidLayout(format!("duplicate column '{}'", name)));
            }
        }

        let species_index = species_index
            .ok_or_else(|| DiagnosisError::InvalidLayout(format!("no '{}' column", SPECIES_COLUMN)))?;

        if symptom_index.is_empty() {
            return Err(DiagnosisError::InvalidLayout("no symptom columns".to_string()));
        }

        let hash = compute_layout_hash(&columns);

        Ok(Self {
            columns,
            species_index,
            symptom_index,
            hash,
        })
    }

    /// Columns in model order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Total number of features
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Position of the species-code column
    pub fn species_index(&self) -> usize {
        self.species_index
    }

    /// Position of a symptom column
    pub fn symptom_index(&self, name: &str) -> Option<usize> {
        self.symptom_index.get(name).copied()
    }

    /// Symptom names in model order
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        let species = self.species_index;
        self.columns
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != species)
            .map(|(_, c)| c.as_str())
    }

    pub fn symptom_count(&self) -> usize {
        self.symptom_index.len()
    }

    /// Get feature index by name
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        if name == SPECIES_COLUMN {
            Some(self.species_index)
        } else {
            self.symptom_index(name)
        }
    }

    /// Get feature name by index
    pub fn feature_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Validate that a model trained against `expected_hash` fits this layout
    pub fn validate(&self, expected_hash: u32) -> Result<()> {
        if expected_hash != self.hash {
            return Err(DiagnosisError::LayoutMismatch {
                expected: expected_hash,
                actual: self.hash,
            });
        }
        Ok(())
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            version: LAYOUT_VERSION,
            hash: self.hash,
            feature_count: self.len(),
            feature_names: self.columns.clone(),
        }
    }
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

// ============================================================================
// TESTS
// ============================================================================
