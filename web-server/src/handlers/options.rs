//! Form options handler

use axum::{extract::State, Json};

use crate::models::FormOptions;
use crate::AppState;

/// Species and symptom lists for API clients
pub async fn list(State(state): State<AppState>) -> Json<FormOptions> {
    Json(state.options.as_ref().clone())
}
