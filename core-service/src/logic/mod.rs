//! Logic Module - Training & Prediction Engines
//!
//! - `dataset/` - CSV dataset (species, symptom flags, disease)
//! - `features/` - encoder, feature layout, feature vectors
//! - `model/` - classifier capability + random forest
//! - `disease/` - catalog, severity tiers, contact guidance

pub mod dataset;
pub mod features;
pub mod model;
pub mod disease;

pub mod artifacts;
pub mod trainer;
pub mod predictor;
