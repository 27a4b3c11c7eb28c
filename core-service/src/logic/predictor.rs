//! Predictor - encode -> predict -> interpret
//!
//! Built once from the loaded artifacts and shared read-only. Every call
//! runs the whole pipeline synchronously:
//!
//! 1. Reject an empty symptom selection (the classifier is not called)
//! 2. Encode species + symptoms into a fixed-shape row
//! 3. One `predict` call
//! 4. Resolve description and triage from the disease catalog

use serde::Serialize;

use crate::constants::NO_DESCRIPTION;
use crate::error::{DiagnosisError, Result};
use crate::logic::artifacts::ArtifactBundle;
use crate::logic::disease::{ContactGuidance, DiseaseCatalog, Triage};
use crate::logic::features::{FeatureLayout, FeatureVector, FeatureVectorBuilder, SpeciesEncoder};
use crate::logic::model::{Classifier, RandomForest};

/// Result of one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub pet_type: String,
    /// Selected symptoms in feature-column order
    pub symptoms: Vec<String>,
    pub disease: String,
    pub description: String,
    /// False when the label had no catalog entry
    pub described: bool,
    pub triage: Triage,
}

impl Diagnosis {
    pub fn guidance(&self) -> ContactGuidance {
        ContactGuidance::for_triage(self.triage)
    }
}

pub struct Predictor<C = RandomForest> {
    classifier: C,
    encoder: SpeciesEncoder,
    layout: FeatureLayout,
    catalog: DiseaseCatalog,
}

impl<C: Classifier> Predictor<C> {
    pub fn new(classifier: C, encoder: SpeciesEncoder, layout: FeatureLayout, catalog: DiseaseCatalog) -> Self {
        Self {
            classifier,
            encoder,
            layout,
            catalog,
        }
    }

    pub fn from_bundle(bundle: ArtifactBundle<C>, catalog: DiseaseCatalog) -> Self {
        Self::new(bundle.model.classifier, bundle.encoder, bundle.layout, catalog)
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn encoder(&self) -> &SpeciesEncoder {
        &self.encoder
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Build the feature row for one submission.
    pub fn encode<S: AsRef<str>>(&self, species: &str, symptoms: &[S]) -> Result<FeatureVector> {
        let code = self.encoder.encode(species)?;

        let mut builder = FeatureVectorBuilder::new(&self.layout).species_code(code);
        for symptom in symptoms {
            builder = builder.symptom(symptom.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Run the full pipeline for one submission.
    pub fn diagnose<S: AsRef<str>>(&self, species: &str, symptoms: &[S]) -> Result<Diagnosis> {
        if symptoms.is_empty() {
            return Err(DiagnosisError::EmptySelection);
        }

        let vector = self.encode(species, symptoms)?;
        log::debug!("Prediction input: {}", vector.to_log_entry(&self.layout));

        let disease = self.classifier.predict(vector.as_slice())?;

        let (description, described) = match self.catalog.lookup(&disease) {
            Ok(info) => (info.description.clone(), true),
            Err(unmapped) => {
                log::warn!("{}; showing placeholder text", unmapped);
                (NO_DESCRIPTION.to_string(), false)
            }
        };
        let triage = self.catalog.triage(&disease);

        log::info!("Predicted '{}' for {} ({})", disease, species, triage);

        Ok(Diagnosis {
            pet_type: species.to_string(),
            symptoms: vector
                .active_symptoms(&self.layout)
                .into_iter()
                .map(str::to_string)
                .collect(),
            disease,
            description,
            described,
            triage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::ForestConfig;
    use crate::logic::trainer::{fit_artifacts, tests::sample_dataset};
    use std::cell::Cell;

    /// Returns a fixed label and counts calls
    struct StubClassifier {
        label: Option<String>,
        calls: Cell<usize>,
    }

    impl StubClassifier {
        fn returning(label: &str) -> Self {
            Self {
                label: Some(label.to_string()),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                label: None,
                calls: Cell::new(0),
            }
        }
    }

    impl Classifier for StubClassifier {
        fn fit(&mut self, _samples: &[Vec<f64>], _labels: &[String]) -> Result<()> {
            Ok(())
        }

        fn predict(&self, features: &[f64]) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            assert_eq!(features.len(), 4);
            self.label
                .clone()
                .ok_or_else(|| DiagnosisError::Classifier("stub failure".to_string()))
        }

        fn n_features(&self) -> Option<usize> {
            Some(4)
        }
    }

    fn predictor(classifier: StubClassifier) -> Predictor<StubClassifier> {
        let encoder = SpeciesEncoder::fit(["Dog", "Cat", "Cow"]).unwrap();
        let layout = FeatureLayout::new(
            ["Pet_Type", "Fever", "Vomiting", "Cough"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap();
        Predictor::new(classifier, encoder, layout, DiseaseCatalog::builtin())
    }

    #[test]
    fn test_empty_selection_skips_classifier() {
        let p = predictor(StubClassifier::returning("Parvovirus"));
        let none: [&str; 0] = [];

        assert!(matches!(p.diagnose("Dog", &none), Err(DiagnosisError::EmptySelection)));
        // Checked before the species lookup
        assert!(matches!(p.diagnose("Horse", &none), Err(DiagnosisError::EmptySelection)));
        assert_eq!(p.classifier().calls.get(), 0);
    }

    #[test]
    fn test_unknown_species_rejected() {
        let p = predictor(StubClassifier::returning("Parvovirus"));
        match p.diagnose("Horse", &["Fever"]) {
            Err(DiagnosisError::UnknownCategory(name)) => assert_eq!(name, "Horse"),
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
        assert_eq!(p.classifier().calls.get(), 0);
    }

    #[test]
    fn test_unknown_symptom_rejected() {
        let p = predictor(StubClassifier::returning("Parvovirus"));
        assert!(matches!(
            p.diagnose("Dog", &["Fever", "Sneezing"]),
            Err(DiagnosisError::UnknownSymptom(_))
        ));
        assert_eq!(p.classifier().calls.get(), 0);
    }

    #[test]
    fn test_encode_fixed_shape() {
        let p = predictor(StubClassifier::returning("Parvovirus"));
        let vector = p.encode("Cow", &["Cough", "Fever"]).unwrap();
        assert_eq!(vector.as_slice(), &[1.0, 1.0, 0.0, 1.0]);
        assert_eq!(vector.layout_hash, p.layout().hash());
    }

    #[test]
    fn test_emergency_label() {
        let p = predictor(StubClassifier::returning("Feline Panleukopenia"));
        let diagnosis = p.diagnose("Cat", &["Vomiting", "Fever"]).unwrap();

        assert_eq!(diagnosis.disease, "Feline Panleukopenia");
        assert_eq!(diagnosis.triage, Triage::Emergency);
        assert!(diagnosis.described);
        assert!(diagnosis.guidance().expanded);
        assert_eq!(diagnosis.symptoms, vec!["Fever", "Vomiting"]);
        assert_eq!(p.classifier().calls.get(), 1);
    }

    #[test]
    fn test_standard_label() {
        let p = predictor(StubClassifier::returning("Foot & Mouth"));
        let diagnosis = p.diagnose("Cow", &["Fever"]).unwrap();
        assert_eq!(diagnosis.triage, Triage::Standard);
        assert!(!diagnosis.guidance().expanded);
    }

    #[test]
    fn test_unmapped_label_gets_placeholder() {
        let p = predictor(StubClassifier::returning("Ringworm"));
        let diagnosis = p.diagnose("Cat", &["Cough"]).unwrap();

        assert_eq!(diagnosis.description, NO_DESCRIPTION);
        assert!(!diagnosis.described);
        assert_eq!(diagnosis.triage, Triage::Standard);
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let p = predictor(StubClassifier::failing());
        let err = p.diagnose("Dog", &["Fever"]).unwrap_err();
        assert!(matches!(err, DiagnosisError::Classifier(_)));
        assert_eq!(p.classifier().calls.get(), 1);
    }

    #[test]
    fn test_end_to_end_parvovirus() {
        let forest = RandomForest::new(ForestConfig::default());
        let (bundle, _) = fit_artifacts(&sample_dataset(), forest).unwrap();
        let p = Predictor::from_bundle(bundle, DiseaseCatalog::builtin());

        let code = p.encoder().encode("Dog").unwrap();
        let vector = p.encode("Dog", &["Fever", "Vomiting"]).unwrap();
        assert_eq!(vector.as_slice(), &[code as f64, 1.0, 1.0, 0.0]);

        let diagnosis = p.diagnose("Dog", &["Fever", "Vomiting"]).unwrap();
        assert_eq!(diagnosis.disease, "Parvovirus");
        assert_eq!(diagnosis.triage, Triage::Emergency);
        assert!(diagnosis.description.contains("dogs"));
    }
}
