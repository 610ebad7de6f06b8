use serde::{Deserialize, Serialize};

use crate::doctor::DoctorRecord;

/// Specialization used when nothing usable can be recovered from the model reply
pub const DEFAULT_SPECIALIZATION: &str = "General Medicine";

/// Confidence used when the model reply carries none
pub const DEFAULT_CONFIDENCE: &str = "medium";

/// Reasoning used when the model reply carries none
pub const DEFAULT_REASONING: &str = "Unable to extract specific specialization";

/// The three-field record inferred from a symptom description.
///
/// `confidence` is conventionally one of `high`, `medium` or `low`, but
/// whatever the model said is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub specialization: String,
    pub confidence: String,
    pub reasoning: String,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            specialization: DEFAULT_SPECIALIZATION.to_string(),
            confidence: DEFAULT_CONFIDENCE.to_string(),
            reasoning: DEFAULT_REASONING.to_string(),
        }
    }
}

/// Result of one successful analysis: the inferred specialization and
/// every doctor the directory lists under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referral {
    pub analysis: AnalysisResult,
    pub doctors: Vec<DoctorRecord>,
}
