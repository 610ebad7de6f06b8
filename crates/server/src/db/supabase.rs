use async_trait::async_trait;
use medmatch_core::DoctorRecord;
use serde::Deserialize;

use super::{RecordStore, StoreError};

/// Record store backed by the Supabase REST (PostgREST) interface
#[derive(Clone)]
pub struct SupabaseRecordStore {
    http: reqwest::Client,
    url: String,
    key: String,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct RestError {
    message: String,
}

impl SupabaseRecordStore {
    pub fn new(url: String, key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    async fn get(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<DoctorRecord>, StoreError> {
        let response = self
            .http
            .get(self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<RestError>(&body) {
                Ok(err) => err.message,
                Err(_) => body,
            };
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Vec<DoctorRecord>>().await?)
    }
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<DoctorRecord>, StoreError> {
        self.get(
            table,
            &[("select", "*".to_string()), (column, format!("eq.{value}"))],
        )
        .await
    }

    async fn ping(&self, table: &str) -> Result<(), StoreError> {
        self.get(table, &[("select", "*".to_string()), ("limit", "1".to_string())])
            .await
            .map(|_| ())
    }
}
