use serde::{Deserialize, Serialize};

use crate::analysis::Referral;

/// Top-level `status` discriminator shared by every response body
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// `{"status": "success", "analysis": {...}, "doctors": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub status: ResponseStatus,
    #[serde(flatten)]
    pub referral: Referral,
}

impl SuccessEnvelope {
    pub fn new(referral: Referral) -> Self {
        Self {
            status: ResponseStatus::Success,
            referral,
        }
    }
}

/// Which key carries the human-readable text of an error body.
///
/// Input validation failures use `error`; everything else uses `message`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorDetail {
    #[serde(rename = "error")]
    Error(String),
    #[serde(rename = "message")]
    Message(String),
}

/// `{"status": "error", "error" | "message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub status: ResponseStatus,
    #[serde(flatten)]
    pub detail: ErrorDetail,
}

impl ErrorEnvelope {
    /// Error body for rejected input
    pub fn invalid(text: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            detail: ErrorDetail::Error(text.to_string()),
        }
    }

    /// Error body for everything other than rejected input
    pub fn message(text: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            detail: ErrorDetail::Message(text.to_string()),
        }
    }
}
