//! Application error handling
//!
//! Every failure a handler can produce ends up here and is turned into the
//! `{"status": "error", ...}` envelope. Internal detail is logged, never sent.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medmatch_core::ErrorEnvelope;

use crate::ai::AnalysisError;

pub const INVALID_SYMPTOMS_MESSAGE: &str = "Please provide a valid symptom description";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Unable to process symptoms";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";
pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Symptom text missing or blank
    InvalidSymptoms,
    /// The model or the directory failed
    AnalysisFailed(AnalysisError),
    /// Anything else; the detail is only logged
    Unexpected(String),
    NotFound,
    MethodNotAllowed,
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::AnalysisFailed(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            AppError::InvalidSymptoms => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope::invalid(INVALID_SYMPTOMS_MESSAGE),
            ),
            AppError::AnalysisFailed(err) => {
                tracing::error!(error = %err, "Symptom analysis failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::message(ANALYSIS_FAILED_MESSAGE),
                )
            }
            AppError::Unexpected(detail) => {
                tracing::error!(error = %detail, "Error in symptoms analysis");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::message(UNEXPECTED_MESSAGE),
                )
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorEnvelope::message(NOT_FOUND_MESSAGE),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorEnvelope::message(METHOD_NOT_ALLOWED_MESSAGE),
            ),
        };

        (status, Json(envelope)).into_response()
    }
}

/// Convert a handler panic into the generic 500 envelope
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Unexpected(format!("handler panicked: {detail}")).into_response()
}
