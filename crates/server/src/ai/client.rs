//! Gemini API client for the `generateContent` endpoint

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Failure talking to the model service
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No text content in response")]
    EmptyResponse,
}

/// A text-in, text-out language model
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send a single prompt and return the model's text reply
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Client for the Google Gemini API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// A turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A piece of a turn; only text parts are used here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Request body for `generateContent`
#[derive(Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
}

/// Response from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Error detail from the Gemini API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    /// Create a new client with the given API key and the default model
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Use a different model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send a full request and return the decoded response
    pub async fn send(&self, contents: Vec<Content>) -> Result<ApiResponse, ModelError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&ApiRequest { contents })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(api_err) => api_err.error.message,
                Err(_) => body,
            };
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ApiResponse>().await?)
    }

    /// Extract the first text part of the first candidate
    pub fn extract_text(response: &ApiResponse) -> Result<String, ModelError> {
        let candidate = response.candidates.first().ok_or(ModelError::EmptyResponse)?;

        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!(finish_reason = %reason, "Gemini candidate finished");
        }

        candidate
            .content
            .iter()
            .flat_map(|content| &content.parts)
            .find_map(|part| part.text.clone())
            .ok_or(ModelError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let contents = vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(prompt.to_string()),
            }],
        }];

        let response = self.send(contents).await?;
        Self::extract_text(&response)
    }
}
