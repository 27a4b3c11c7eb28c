//! Feature Vector - Core data structure for model input
//!
//! A vector is always created from a [`FeatureLayout`], so its length and
//! column order are fixed by the layout the model was trained on. It carries
//! the layout hash for mismatch detection.

use serde::{Deserialize, Serialize};

use super::layout::FeatureLayout;
use crate::error::{DiagnosisError, Result};

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Fixed-shape feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// CRC32 hash of the layout this row was built for
    pub layout_hash: u32,
    /// Values in layout order
    values: Vec<f64>,
}

impl FeatureVector {
    /// All-zero row for a layout
    pub fn zeroed(layout: &FeatureLayout) -> Self {
        Self {
            layout_hash: layout.hash(),
            values: vec![0.0; layout.len()],
        }
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, layout: &FeatureLayout, name: &str) -> Option<f64> {
        layout.feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index (out-of-range indices are ignored)
    pub fn set(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Validate that this vector was built for `layout`
    pub fn validate(&self, layout: &FeatureLayout) -> Result<()> {
        layout.validate(self.layout_hash)?;
        if self.values.len() != layout.len() {
            return Err(DiagnosisError::InvalidLayout(format!(
                "vector has {} values, layout has {} columns",
                self.values.len(),
                layout.len()
            )));
        }
        Ok(())
    }

    /// Symptom columns set to 1, in layout order
    pub fn active_symptoms<'a>(&self, layout: &'a FeatureLayout) -> Vec<&'a str> {
        layout
            .symptoms()
            .filter(|name| {
                layout
                    .symptom_index(name)
                    .and_then(|i| self.get(i))
                    .map_or(false, |v| v == 1.0)
            })
            .collect()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self, layout: &FeatureLayout) -> serde_json::Value {
        serde_json::json!({
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": layout.columns().iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.clone(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builds a row by name, resolving every name through the layout.
pub struct FeatureVectorBuilder<'a> {
    layout: &'a FeatureLayout,
    vector: FeatureVector,
}

impl<'a> FeatureVectorBuilder<'a> {
    pub fn new(layout: &'a FeatureLayout) -> Self {
        Self {
            layout,
            vector: FeatureVector::zeroed(layout),
        }
    }

    /// Species-code column
    pub fn species_code(mut self, code: usize) -> Self {
        self.vector.set(self.layout.species_index(), code as f64);
        self
    }

    /// Flag one symptom as present
    pub fn symptom(mut self, name: &str) -> Result<Self> {
        let index = self
            .layout
            .symptom_index(name)
            .ok_or_else(|| DiagnosisError::UnknownSymptom(name.to_string()))?;
        self.vector.set(index, 1.0);
        Ok(self)
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}
