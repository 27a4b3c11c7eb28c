//! Random Forest Classifier
//!
//! Ensemble of [`DecisionTree`]s, each grown on a bootstrap sample with
//! √k features examined per split. Prediction averages the trees' leaf
//! probabilities; the first class with the highest mean wins.
//!
//! A single seeded `StdRng` drives every random draw in a fixed order, so
//! the same data, config and seed always produce the same forest.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::classifier::Classifier;
use super::decision_tree::{argmax, DecisionTree, TreeParams};
use crate::constants::{get_n_estimators, get_random_seed, DEFAULT_N_ESTIMATORS, DEFAULT_RANDOM_SEED};
use crate::error::{DiagnosisError, Result};

// ============================================================================
// CONFIG
// ============================================================================

/// Forest hyper-parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Sample rows with replacement per tree
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            seed: DEFAULT_RANDOM_SEED,
            max_depth: None,
            min_samples_split: 2,
            bootstrap: true,
        }
    }
}

impl ForestConfig {
    /// Defaults with `N_ESTIMATORS` / `RANDOM_SEED` overrides
    pub fn from_env() -> Self {
        Self {
            n_estimators: get_n_estimators(),
            seed: get_random_seed(),
            ..Default::default()
        }
    }

    pub fn with_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

// ============================================================================
// FOREST
// ============================================================================

/// Prediction with the averaged class probabilities
#[derive(Debug, Clone, Serialize)]
pub struct ForestPrediction {
    pub label: String,
    /// Mean probability of the winning class
    pub confidence: f64,
    /// Mean probability per class, aligned with `RandomForest::classes`
    pub probabilities: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    /// Sorted distinct training labels
    classes: Vec<String>,
    n_features: Option<usize>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Unfitted forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            classes: Vec::new(),
            n_features: None,
            trees: Vec::new(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean class probabilities over all trees
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        self.check_input(features)?;

        let mut sum = vec![0.0f64; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }

        let n = self.trees.len() as f64;
        Ok(sum.into_iter().map(|s| s / n).collect())
    }

    /// Predict with probabilities
    pub fn predict_detailed(&self, features: &[f64]) -> Result<ForestPrediction> {
        let probabilities = self.predict_proba(features)?;
        let class = argmax(&probabilities);

        Ok(ForestPrediction {
            label: self.classes[class].clone(),
            confidence: probabilities[class],
            probabilities,
        })
    }

    fn check_input(&self, features: &[f64]) -> Result<()> {
        let expected = self
            .n_features
            .ok_or_else(|| DiagnosisError::Classifier("forest is not fitted".to_string()))?;
        if features.len() != expected {
            return Err(DiagnosisError::Classifier(format!(
                "expected {} features, got {}",
                expected,
                features.len()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// CLASSIFIER IMPLEMENTATION
// ============================================================================

impl Classifier for RandomForest {
    fn fit(&mut self, samples: &[Vec<f64>], labels: &[String]) -> Result<()> {
        if samples.is_empty() {
            return Err(DiagnosisError::Classifier("no training rows".to_string()));
        }
        if samples.len() != labels.len() {
            return Err(DiagnosisError::Classifier(format!(
                "{} rows but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        let n_features = samples[0].len();
        if n_features == 0 || samples.iter().any(|row| row.len() != n_features) {
            return Err(DiagnosisError::Classifier("ragged or empty feature rows".to_string()));
        }
        if self.config.n_estimators == 0 {
            return Err(DiagnosisError::Classifier("n_estimators must be > 0".to_string()));
        }

        let classes: Vec<String> = labels.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let targets: Vec<usize> = labels
            .iter()
            .map(|l| classes.binary_search(l).unwrap_or(0))
            .collect();

        let params = TreeParams {
            max_features: ((n_features as f64).sqrt() as usize).max(1),
            min_samples_split: self.config.min_samples_split.max(2),
            max_depth: self.config.max_depth,
        };

        log::debug!(
            "Fitting forest: {} trees, {} rows, {} features, {} classes, seed {}",
            self.config.n_estimators,
            samples.len(),
            n_features,
            classes.len(),
            self.config.seed
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let n = samples.len();
        let trees = (0..self.config.n_estimators)
            .map(|_| {
                let indices: Vec<usize> = if self.config.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTree::grow(samples, &targets, indices, classes.len(), &params, &mut rng)
            })
            .collect();

        self.classes = classes;
        self.n_features = Some(n_features);
        self.trees = trees;
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<String> {
        Ok(self.predict_detailed(features)?.label)
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn check(&self) -> Result<()> {
        let corrupt = |reason: String| DiagnosisError::Classifier(reason);

        let n_features = self
            .n_features
            .ok_or_else(|| corrupt("forest is not fitted".to_string()))?;
        if self.trees.is_empty() {
            return Err(corrupt("forest has no trees".to_string()));
        }
        if self.classes.is_empty() {
            return Err(corrupt("forest has no classes".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check().map_err(|e| corrupt(format!("tree {}: {}", i, e)))?;
            if tree.n_features() != n_features || tree.n_classes() != self.classes.len() {
                return Err(corrupt(format!("tree {} shape differs from forest", i)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Pet_Type code, Fever, Vomiting, Cough; each row three times
    fn training_set() -> (Vec<Vec<f64>>, Vec<String>) {
        let rows = [
            (vec![2.0, 1.0, 1.0, 0.0], "Parvovirus"),
            (vec![2.0, 1.0, 0.0, 1.0], "Canine Influenza"),
            (vec![0.0, 1.0, 0.0, 1.0], "Feline Flu"),
            (vec![0.0, 1.0, 1.0, 0.0], "Feline Panleukopenia"),
            (vec![1.0, 1.0, 0.0, 0.0], "Foot & Mouth"),
            (vec![1.0, 0.0, 1.0, 0.0], "Bovine Viral Diarrhea"),
        ];
        let mut samples = Vec::new();
        let mut targets = Vec::new();
        for _ in 0..3 {
            for (row, label) in &rows {
                samples.push(row.clone());
                targets.push(label.to_string());
            }
        }
        (samples, targets)
    }

    fn fitted(config: ForestConfig) -> RandomForest {
        let (samples, targets) = training_set();
        let mut forest = RandomForest::new(config);
        forest.fit(&samples, &targets).unwrap();
        forest
    }

    #[test]
    fn test_reproduces_training_rows() {
        let forest = fitted(ForestConfig::default());
        let (samples, targets) = training_set();

        for (row, target) in samples.iter().zip(targets.iter()) {
            assert_eq!(&forest.predict(row).unwrap(), target);
        }
        assert_eq!(forest.n_trees(), 100);
        assert!(forest.check().is_ok());
    }

    #[test]
    fn test_classes_sorted() {
        let forest = fitted(ForestConfig::default().with_estimators(5));
        assert_eq!(forest.classes().first().map(String::as_str), Some("Bovine Viral Diarrhea"));
        assert_eq!(forest.classes().last().map(String::as_str), Some("Parvovirus"));
        assert_eq!(forest.classes().len(), 6);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let a = fitted(ForestConfig::default().with_estimators(20).with_seed(42));
        let b = fitted(ForestConfig::default().with_estimators(20).with_seed(42));
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let forest = fitted(ForestConfig::default().with_estimators(25));
        let prediction = forest.predict_detailed(&[2.0, 1.0, 1.0, 0.0]).unwrap();

        let total: f64 = prediction.probabilities.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(prediction.label, "Parvovirus");
        assert!(prediction.confidence > 0.5);
    }

    #[test]
    fn test_unfitted_predict_fails() {
        let forest = RandomForest::new(ForestConfig::default());
        assert!(!forest.is_fitted());
        assert!(forest.predict(&[0.0]).is_err());
        assert!(forest.check().is_err());
    }

    #[test]
    fn test_wrong_width_rejected() {
        let forest = fitted(ForestConfig::default().with_estimators(3));
        let err = forest.predict(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, DiagnosisError::Classifier(_)));
    }

    #[test]
    fn test_invalid_training_input() {
        let mut forest = RandomForest::new(ForestConfig::default());
        assert!(forest.fit(&[], &[]).is_err());
        assert!(forest.fit(&[vec![1.0]], &labels(&["a", "b"])).is_err());
        assert!(forest.fit(&[vec![1.0], vec![1.0, 0.0]], &labels(&["a", "b"])).is_err());

        let mut empty = RandomForest::new(ForestConfig::default().with_estimators(0));
        assert!(empty.fit(&[vec![1.0]], &labels(&["a"])).is_err());
    }

    #[test]
    fn test_json_round_trip_exact() {
        let forest = fitted(ForestConfig::default().with_estimators(10));
        let json = serde_json::to_string(&forest).unwrap();
        let back: RandomForest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, forest);
        assert!(back.check().is_ok());
    }
}
