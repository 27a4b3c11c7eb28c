//! Health check handler

use axum::{extract::State, Json};
use pet_diagnosis_core::ModelInfo;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    model: ModelInfo,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        model: state.model_info.as_ref().clone(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
