//! Species Encoder - Closed-world label encoding
//!
//! Codes are positions in the sorted list of distinct training species, so
//! the same dataset always yields the same mapping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{DiagnosisError, Result};

/// Bijective species <-> code mapping fixed at training time.
///
/// Deserializing goes through [`SpeciesEncoder::from_classes`], so a stored
/// encoder that `fit` could not have produced never loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEncoder")]
pub struct SpeciesEncoder {
    classes: Vec<String>,
}

/// On-disk form of the encoder
#[derive(Deserialize)]
struct StoredEncoder {
    classes: Vec<String>,
}

impl TryFrom<StoredEncoder> for SpeciesEncoder {
    type Error = DiagnosisError;

    fn try_from(stored: StoredEncoder) -> Result<Self> {
        Self::from_classes(stored.classes)
    }
}

impl SpeciesEncoder {
    /// Fit over observed species values (duplicates allowed).
    pub fn fit<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if classes.is_empty() {
            return Err(DiagnosisError::EmptyDataset);
        }

        Ok(Self { classes })
    }

    /// Rebuild from a stored class list, rejecting anything `fit` could not produce.
    pub fn from_classes(classes: Vec<String>) -> Result<Self> {
        let encoder = Self { classes };
        encoder.check()?;
        Ok(encoder)
    }

    /// Sorted, distinct and non-empty
    pub fn check(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(DiagnosisError::InvalidEncoder("no classes".to_string()));
        }
        if self.classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DiagnosisError::InvalidEncoder(
                "classes are not sorted and distinct".to_string(),
            ));
        }
        Ok(())
    }

    /// Species -> code. Unseen species are an error.
    pub fn encode(&self, species: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(species))
            .map_err(|_| DiagnosisError::UnknownCategory(species.to_string()))
    }

    /// Code -> species
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    pub fn contains(&self, species: &str) -> bool {
        self.encode(species).is_ok()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_sorted_order() {
        let encoder = SpeciesEncoder::fit(["Dog", "Cat", "Cow", "Dog"]).unwrap();
        assert_eq!(encoder.classes(), ["Cat", "Cow", "Dog"]);
        assert_eq!(encoder.encode("Cat").unwrap(), 0);
        assert_eq!(encoder.encode("Cow").unwrap(), 1);
        assert_eq!(encoder.encode("Dog").unwrap(), 2);
    }

    #[test]
    fn test_round_trip_every_class() {
        let encoder = SpeciesEncoder::fit(["Rabbit", "Dog", "Cat", "Cow", "Goat"]).unwrap();
        for species in encoder.classes() {
            let code = encoder.encode(species).unwrap();
            assert_eq!(encoder.decode(code), Some(species.as_str()));
        }
    }

    #[test]
    fn test_unknown_species() {
        let encoder = SpeciesEncoder::fit(["Dog", "Cat"]).unwrap();
        let err = encoder.encode("Horse").unwrap_err();
        assert!(matches!(err, DiagnosisError::UnknownCategory(ref s) if s == "Horse"));
        assert!(!encoder.contains("dog"));
        assert_eq!(encoder.decode(7), None);
    }

    #[test]
    fn test_fit_order_independent() {
        let a = SpeciesEncoder::fit(["Dog", "Cat", "Cow"]).unwrap();
        let b = SpeciesEncoder::fit(["Cow", "Dog", "Cat"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_fit_rejected() {
        assert!(SpeciesEncoder::fit(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_from_classes_validates() {
        assert!(SpeciesEncoder::from_classes(vec!["Cat".into(), "Dog".into()]).is_ok());
        assert!(SpeciesEncoder::from_classes(vec!["Dog".into(), "Cat".into()]).is_err());
        assert!(SpeciesEncoder::from_classes(vec!["Dog".into(), "Dog".into()]).is_err());
        assert!(SpeciesEncoder::from_classes(vec![]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let encoder: SpeciesEncoder = serde_json::from_str(r#"{"classes":["Cat","Dog"]}"#).unwrap();
        assert_eq!(encoder.encode("Dog").unwrap(), 1);

        let err = serde_json::from_str::<SpeciesEncoder>(r#"{"classes":["Dog","Cat"]}"#).unwrap_err();
        assert!(err.to_string().contains("not sorted"), "{}", err);
        assert!(serde_json::from_str::<SpeciesEncoder>(r#"{"classes":[]}"#).is_err());
    }
}
