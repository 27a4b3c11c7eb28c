//! Features Module - Model Input Encoding
//!
//! Turns a (species, symptom set) selection into the exact numeric row the
//! classifier was trained on.

pub mod encoder;
pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use encoder::SpeciesEncoder;
pub use layout::{FeatureLayout, LayoutInfo, LAYOUT_VERSION};
pub use vector::{FeatureVector, FeatureVectorBuilder};
