//! medmatch-core: domain types and model-output parsing
//!
//! This crate has no I/O. It provides the analysis record, the opaque doctor
//! record, the JSON response envelopes, the model prompt and the extractor
//! that recovers a structured analysis from free-form model text.

pub mod analysis;
pub mod doctor;
pub mod envelope;
pub mod extract;
pub mod prompt;

pub use analysis::{
    AnalysisResult, DEFAULT_CONFIDENCE, DEFAULT_REASONING, DEFAULT_SPECIALIZATION, Referral,
};
pub use doctor::{DOCTORS_TABLE, DoctorRecord, SPECIALIZATION_FIELD};
pub use envelope::{ErrorDetail, ErrorEnvelope, ResponseStatus, SuccessEnvelope};
pub use extract::extract;
pub use prompt::build_prompt;
