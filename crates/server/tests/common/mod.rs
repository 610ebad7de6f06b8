//! Shared test doubles and request helpers.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use medmatch_core::DoctorRecord;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use medmatch_server::ai::{CompletionModel, ModelError, SymptomAnalyzer};
use medmatch_server::config::{Config, DirectoryConfig};
use medmatch_server::db::{RecordStore, StoreError};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

enum Reply {
    Text(String),
    Fail,
    Panic,
}

/// Model double that answers every prompt the same way.
pub struct FakeModel {
    reply: Reply,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeModel {
    fn with(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::with(Reply::Text(text.to_string()))
    }

    pub fn failing() -> Arc<Self> {
        Self::with(Reply::Fail)
    }

    pub fn panicking() -> Arc<Self> {
        Self::with(Reply::Panic)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for FakeModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail => Err(ModelError::Api {
                status: 500,
                message: "internal model failure: secret-stack-detail".to_string(),
            }),
            Reply::Panic => panic!("model exploded"),
        }
    }
}

/// In-memory directory that filters its records by exact string equality.
pub struct FakeStore {
    records: Vec<DoctorRecord>,
    fail: bool,
    calls: AtomicUsize,
    last_query: Mutex<Option<(String, String, String)>>,
}

impl FakeStore {
    pub fn with_records(records: Vec<JsonValue>) -> Arc<Self> {
        Arc::new(Self {
            records: records
                .into_iter()
                .map(|r| DoctorRecord::try_from(r).expect("record must be an object"))
                .collect(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            records: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<(String, String, String)> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<DoctorRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() =
            Some((table.to_string(), column.to_string(), value.to_string()));

        if self.fail {
            return Err(StoreError::Api {
                status: 503,
                message: "directory down".to_string(),
            });
        }

        Ok(self
            .records
            .iter()
            .filter(|r| r.get(column).and_then(JsonValue::as_str) == Some(value))
            .cloned()
            .collect())
    }

    async fn ping(&self, _table: &str) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Api {
                status: 503,
                message: "directory down".to_string(),
            });
        }
        Ok(())
    }
}

/// A small directory with doctors across three specializations.
pub fn sample_directory() -> Vec<JsonValue> {
    vec![
        serde_json::json!({"id": 1, "name": "Dr. Amara Osei", "specialization": "Cardiology", "city": "Accra"}),
        serde_json::json!({"id": 2, "name": "Dr. Lena Fischer", "specialization": "Cardiology", "city": "Berlin"}),
        serde_json::json!({"id": 3, "name": "Dr. Kenji Sato", "specialization": "Neurology", "city": "Osaka"}),
        serde_json::json!({"id": 4, "name": "Dr. Priya Nair", "specialization": "General Medicine", "city": "Kochi"}),
    ]
}

// ---------------------------------------------------------------------------
// App and request helpers
// ---------------------------------------------------------------------------

/// Configuration used by tests; the directory entry is never dialled.
pub fn test_config() -> Config {
    Config {
        bind_address: "0.0.0.0:0".to_string(),
        gemini_api_key: "test-key".to_string(),
        gemini_model: "gemini-test".to_string(),
        gemini_base_url: "http://127.0.0.1:1".to_string(),
        directory: DirectoryConfig::Supabase {
            url: "http://127.0.0.1:1".to_string(),
            key: "test-key".to_string(),
        },
        cors_origins: vec!["*".to_string()],
    }
}

/// Build the app router around the given doubles.
pub fn test_app(model: Arc<FakeModel>, store: Arc<FakeStore>) -> Router {
    let analyzer = SymptomAnalyzer::new(model, store);
    medmatch_server::build_app(analyzer, &test_config())
}

/// Send a request to the app and return (status, body as JSON).
pub async fn request(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.clone().oneshot(req).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };

    (status, body)
}

/// Build a GET request.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a POST request with a JSON body.
pub fn post(uri: &str, body: JsonValue) -> Request<Body> {
    post_raw(uri, serde_json::to_vec(&body).unwrap())
}

/// Build a POST request with an arbitrary body and a JSON content type.
pub fn post_raw(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body.into())
        .unwrap()
}
