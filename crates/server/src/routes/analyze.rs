//! Symptom analysis endpoint

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use medmatch_core::SuccessEnvelope;
use serde::Deserialize;

use crate::ai::SymptomAnalyzer;
use crate::error::AppError;
use crate::middleware::RequestId;

/// Request body for symptom analysis
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    symptoms: String,
}

/// POST /analyze-symptoms — Suggest a specialization and matching doctors
///
/// A body that is not a JSON object with an optional string `symptoms`
/// field is an unexpected error (500), not a validation error.
pub async fn analyze(
    State(analyzer): State<SymptomAnalyzer>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<SuccessEnvelope>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Unexpected(rejection.body_text()))?;

    let symptoms = body.symptoms.trim();
    if symptoms.is_empty() {
        return Err(AppError::InvalidSymptoms);
    }

    tracing::info!(
        request_id = %request_id.0,
        symptoms_len = symptoms.len(),
        "Analyzing symptoms"
    );

    let referral = analyzer.analyze(symptoms).await?;
    Ok(Json(SuccessEnvelope::new(referral)))
}
