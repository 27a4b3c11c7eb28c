//! Prediction models

use pet_diagnosis_core::{ContactGuidance, Diagnosis, Triage};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Message shown when the form is submitted without symptoms
pub const EMPTY_SELECTION_WARNING: &str = "Select at least one symptom";

/// `POST /api/v1/predict` body
#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, max = 64, message = "pet_type is required"))]
    pub pet_type: String,

    #[serde(default)]
    #[validate(length(max = 256))]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub pet_type: String,
    pub symptoms: Vec<String>,
    pub disease: String,
    pub description: String,
    pub described: bool,
    pub triage: Triage,
    pub emergency: bool,
    pub guidance: ContactGuidance,
}

impl From<Diagnosis> for PredictResponse {
    fn from(d: Diagnosis) -> Self {
        let guidance = d.guidance();
        Self {
            emergency: d.triage.is_emergency(),
            pet_type: d.pet_type,
            symptoms: d.symptoms,
            disease: d.disease,
            description: d.description,
            described: d.described,
            triage: d.triage,
            guidance,
        }
    }
}

/// Browser form submission: `pet_type` plus one `symptom` field per checked box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionForm {
    pub pet_type: String,
    pub symptoms: Vec<String>,
}

impl PredictionForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "pet_type" => form.pet_type = value,
                "symptom" => form.symptoms.push(value),
                _ => {}
            }
        }
        form
    }

    pub fn is_checked(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }
}

/// What the prediction page shows under the form
#[derive(Debug, Clone)]
pub enum FormOutcome {
    Diagnosis(Diagnosis),
    Warning(String),
    Error(String),
}
