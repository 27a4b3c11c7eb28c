//! Pet Disease App - Web Server
//!
//! Web UI and JSON API over the trained pet disease model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PET DISEASE APP                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Pages    │  │  JSON API │  │  Predictor              │ │
//! │  │  (HTML)   │  │  (/api)   │  │  encode→predict→resolve │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │   pet_disease.csv + pet_model.json / le_pet.json /          │
//! │                     feature_columns.json (read once)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod views;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use pet_diagnosis_core::{
    ArtifactBundle, ArtifactStore, Dataset, DiseaseCatalog, ModelInfo, Predictor,
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};
use models::FormOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (JSON lines in production)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pet_diagnosis_web=debug,pet_diagnosis_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Pet Disease App web server starting ({})...", config.environment);
    tracing::info!("Dataset: {}", config.dataset_path.display());
    tracing::info!("Artifacts: {}", config.artifact_dir.display());

    // Artifacts are loaded once; any failure aborts startup
    let state = AppState::load(config.clone())?;

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Shared application state, read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub options: Arc<FormOptions>,
    pub model_info: Arc<ModelInfo>,
    pub config: config::Config,
}

impl AppState {
    /// Read dataset, catalog and artifacts from the configured locations.
    pub fn load(config: config::Config) -> anyhow::Result<Self> {
        let dataset = Dataset::load(&config.dataset_path)
            .with_context(|| format!("failed to load dataset {}", config.dataset_path.display()))?;

        let catalog = DiseaseCatalog::load_or_builtin(config.catalog_path.as_deref())
            .context("failed to load disease catalog")?;

        let bundle: ArtifactBundle = ArtifactStore::new(&config.artifact_dir)
            .load()
            .context("failed to load model artifacts (run the `train` binary first)")?;

        Ok(Self::from_parts(config, &dataset, bundle, catalog))
    }

    pub fn from_parts(
        config: config::Config,
        dataset: &Dataset,
        bundle: ArtifactBundle,
        catalog: DiseaseCatalog,
    ) -> Self {
        for label in catalog.audit(dataset.diseases()) {
            tracing::warn!("Disease '{}' has no catalog entry; it will show placeholder text", label);
        }
        for species in dataset.species() {
            if !bundle.encoder.contains(&species) {
                tracing::warn!("Pet type '{}' was not seen in training; predictions for it will fail", species);
            }
        }
        for symptom in dataset.symptom_columns() {
            if bundle.layout.symptom_index(symptom).is_none() {
                tracing::warn!("Symptom '{}' is not a model feature; selecting it will fail", symptom);
            }
        }

        tracing::info!("Emergency diseases: {}", catalog.emergency_labels().join(", "));

        let options = FormOptions::from_dataset(dataset);
        let model_info = bundle.info();
        tracing::info!(
            "Model ready: {} features, {} species, layout {:08x}, trained {}",
            model_info.layout.feature_count,
            model_info.species.len(),
            model_info.layout.hash,
            model_info.trained_at
        );

        Self {
            predictor: Arc::new(Predictor::from_bundle(bundle, catalog)),
            options: Arc::new(options),
            model_info: Arc::new(model_info),
            config,
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Browser pages
    let page_routes = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/predict", get(handlers::predict::form_redirect).post(handlers::predict::submit_form));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/options", get(handlers::options::list))
        .route("/api/v1/predict", post(handlers::predict::api_predict));

    // Combine all routes
    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
