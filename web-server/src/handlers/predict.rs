//! Prediction handlers
//!
//! The HTML form and the JSON API share the predictor; only the way
//! request errors are reported differs.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use pet_diagnosis_core::DiagnosisError;
use validator::Validate;

use crate::models::{
    FormOutcome, Page, PageState, PredictRequest, PredictResponse, PredictionForm,
    EMPTY_SELECTION_WARNING,
};
use crate::views;
use crate::{AppError, AppResult, AppState};

/// `POST /predict` - urlencoded form from the prediction page
pub async fn submit_form(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> (StatusCode, Html<String>) {
    let form = PredictionForm::from_pairs(pairs);

    let (status, outcome) = match state.predictor.diagnose(&form.pet_type, &form.symptoms) {
        Ok(diagnosis) => (StatusCode::OK, FormOutcome::Diagnosis(diagnosis)),
        Err(DiagnosisError::EmptySelection) => (
            StatusCode::OK,
            FormOutcome::Warning(EMPTY_SELECTION_WARNING.to_string()),
        ),
        Err(err @ (DiagnosisError::UnknownCategory(_) | DiagnosisError::UnknownSymptom(_))) => {
            tracing::warn!("Rejected submission: {}", err);
            (StatusCode::BAD_REQUEST, FormOutcome::Error(err.to_string()))
        }
        Err(err) => {
            tracing::error!("Prediction failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                FormOutcome::Error("Prediction failed. Please try again later.".to_string()),
            )
        }
    };

    let body = views::prediction_form(&state.options, &form, Some(&outcome));
    (status, Html(views::layout(PageState::new(Page::PredictionForm), &body)))
}

/// `GET /predict` - the form lives on the index page
pub async fn form_redirect() -> Redirect {
    Redirect::to(&Page::PredictionForm.href())
}

/// `POST /api/v1/predict`
pub async fn api_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    if req.symptoms.is_empty() {
        return Err(AppError::EmptySelection);
    }
    req.validate()?;

    let diagnosis = state.predictor.diagnose(&req.pet_type, &req.symptoms)?;
    Ok(Json(PredictResponse::from(diagnosis)))
}
