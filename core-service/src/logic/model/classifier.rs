//! Classifier Capability
//!
//! Two operations: `fit` once (trainer), `predict` per request (predictor).

use crate::error::Result;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for fit/predict classifiers (random forest, test doubles, ...)
pub trait Classifier {
    /// Fit on a numeric matrix; `labels[i]` labels `samples[i]`.
    fn fit(&mut self, samples: &[Vec<f64>], labels: &[String]) -> Result<()>;

    /// Predict the label of a single row.
    fn predict(&self, features: &[f64]) -> Result<String>;

    /// Row width seen at fit time, `None` before fitting.
    fn n_features(&self) -> Option<usize>;

    /// Structural self-check for a classifier read back from disk.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    fn is_fitted(&self) -> bool {
        self.n_features().is_some()
    }
}
