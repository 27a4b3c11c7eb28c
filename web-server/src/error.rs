//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use pet_diagnosis_core::DiagnosisError;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Submission errors
    #[error("Unknown pet type '{0}'")]
    UnknownSpecies(String),

    #[error("Unknown symptom '{0}'")]
    UnknownSymptom(String),

    #[error("Select at least one symptom")]
    EmptySelection,

    // Validation errors
    #[error("{0}")]
    ValidationError(String),

    // Prediction errors
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    // Generic errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownSpecies(_)
            | AppError::UnknownSymptom(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EmptySelection => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PredictionFailed(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::PredictionFailed(_) => {
                tracing::error!("{}", self);
                "Prediction failed".to_string()
            }
            AppError::InternalError(_) => {
                tracing::error!("{}", self);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<DiagnosisError> for AppError {
    fn from(err: DiagnosisError) -> Self {
        match err {
            DiagnosisError::UnknownCategory(name) => AppError::UnknownSpecies(name),
            DiagnosisError::UnknownSymptom(name) => AppError::UnknownSymptom(name),
            DiagnosisError::EmptySelection => AppError::EmptySelection,
            DiagnosisError::Classifier(msg) => AppError::PredictionFailed(msg),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
