//! Model Module - Classifier Capability
//!
//! The predictor only knows the [`Classifier`] trait; any learner that can
//! fit a numeric matrix and predict one row can stand in for the shipped
//! random forest.

pub mod classifier;
pub mod decision_tree;
pub mod forest;

// Re-export common types
pub use classifier::Classifier;
pub use decision_tree::{DecisionTree, TreeNode, TreeParams};
pub use forest::{ForestConfig, ForestPrediction, RandomForest};
