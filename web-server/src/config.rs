//! Configuration module

use std::env;
use std::path::PathBuf;

use pet_diagnosis_core::constants::{get_artifact_dir, get_catalog_path, get_dataset_path};

/// Default UI port
pub const DEFAULT_PORT: u16 = 8501;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Dataset the form options are read from
    pub dataset_path: PathBuf,

    /// Directory holding the trained artifacts
    pub artifact_dir: PathBuf,

    /// Disease catalog override (built-in table when unset)
    pub catalog_path: Option<PathBuf>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),

            dataset_path: get_dataset_path(),
            artifact_dir: get_artifact_dir(),
            catalog_path: get_catalog_path(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
