//! Disease Module - Catalog & Triage
//!
//! The catalog is maintained independently of the dataset: it maps each
//! disease label to a description and a severity tier. The tier decides
//! which contact guidance the UI shows.

pub mod catalog;
pub mod triage;

pub use catalog::{DiseaseCatalog, DiseaseInfo, Severity};
pub use triage::{ContactGuidance, Triage};
