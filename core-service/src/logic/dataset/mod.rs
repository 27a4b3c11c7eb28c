//! Dataset Module - Labelled Training Data
//!
//! Header contract: `Pet_Type`, one 0/1 column per symptom, `Disease`.
//! Column order is significant: the non-label columns, in header order,
//! become the frozen feature layout at training time.

pub mod record;
pub mod loader;


use std::collections::{BTreeSet, HashSet};

pub use record::DatasetRecord;

use crate::constants::SPECIES_COLUMN;
use crate::error::Result;
use crate::logic::features::SpeciesEncoder;

/// A fully validated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All non-label columns in header order (species + symptoms)
    feature_columns: Vec<String>,
    /// Symptom columns in header order
    symptom_columns: Vec<String>,
    records: Vec<DatasetRecord>,
    /// SHA-256 of the source bytes, when loaded from a file
    digest: Option<String>,
}

impl Dataset {
    pub(crate) fn new(
        feature_columns: Vec<String>,
        records: Vec<DatasetRecord>,
        digest: Option<String>,
    ) -> Self {
        let symptom_columns = feature_columns
            .iter()
            .filter(|c| c.as_str() != SPECIES_COLUMN)
            .cloned()
            .collect();

        Self {
            feature_columns,
            symptom_columns,
            records,
            digest,
        }
    }

    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Species code column plus symptom columns, in header order
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Symptom columns in header order
    pub fn symptom_columns(&self) -> &[String] {
        &self.symptom_columns
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Distinct species in order of first appearance
    pub fn species(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.pet_type.as_str()))
            .map(|r| r.pet_type.clone())
            .collect()
    }

    /// Distinct disease labels, sorted
    pub fn diseases(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.disease.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Disease label per row
    pub fn labels(&self) -> Vec<String> {
        self.records.iter().map(|r| r.disease.clone()).collect()
    }

    /// Numeric training matrix with the species column replaced by its code.
    ///
    /// Each row follows `feature_columns()` order exactly.
    pub fn feature_matrix(&self, encoder: &SpeciesEncoder) -> Result<Vec<Vec<f64>>> {
        self.records
            .iter()
            .map(|record| {
                let code = encoder.encode(&record.pet_type)?;
                let mut flags = record.symptoms.iter();
                let row = self
                    .feature_columns
                    .iter()
                    .map(|column| {
                        if column == SPECIES_COLUMN {
                            code as f64
                        } else {
                            flags.next().copied().map(f64::from).unwrap_or(0.0)
                        }
                    })
                    .collect();
                Ok(row)
            })
            .collect()
    }
}
