//! Symptom analysis: prompt the model, extract its answer, look up doctors

use std::sync::Arc;

use medmatch_core::{DOCTORS_TABLE, Referral, SPECIALIZATION_FIELD, build_prompt, extract};
use thiserror::Error;

use super::client::{CompletionModel, ModelError};
use crate::db::{RecordStore, StoreError};

/// An analysis that could not be completed
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Model call failed: {0}")]
    Model(#[from] ModelError),

    #[error("Doctor lookup failed: {0}")]
    Store(#[from] StoreError),
}

/// Turns a symptom description into a [`Referral`].
///
/// Holds the two service handles built at startup; cloning is cheap.
#[derive(Clone)]
pub struct SymptomAnalyzer {
    model: Arc<dyn CompletionModel>,
    store: Arc<dyn RecordStore>,
}

impl SymptomAnalyzer {
    pub fn new(model: Arc<dyn CompletionModel>, store: Arc<dyn RecordStore>) -> Self {
        Self { model, store }
    }

    /// Run one analysis.
    ///
    /// A reply the extractor cannot make sense of still produces a result
    /// (the default analysis); only failures of the model call or the
    /// directory query are errors.
    pub async fn analyze(&self, symptoms: &str) -> Result<Referral, AnalysisError> {
        let prompt = build_prompt(symptoms);
        let reply = self.model.complete(&prompt).await?;

        let analysis = extract(&reply);
        tracing::info!(
            specialization = %analysis.specialization,
            confidence = %analysis.confidence,
            "Symptoms analyzed"
        );

        let doctors = self
            .store
            .select_eq(DOCTORS_TABLE, SPECIALIZATION_FIELD, &analysis.specialization)
            .await?;
        tracing::info!(count = doctors.len(), "Matched doctors");

        Ok(Referral { analysis, doctors })
    }

    /// Check that the doctor directory is reachable
    pub async fn check_directory(&self) -> Result<(), StoreError> {
        self.store.ping(DOCTORS_TABLE).await
    }
}
