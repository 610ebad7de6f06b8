//! Doctor directory access
//!
//! Records are read either straight from PostgreSQL or through the Supabase
//! REST interface. Both sit behind [`RecordStore`] so the analyzer never
//! knows which one it is talking to.

mod postgres;
mod supabase;

pub use postgres::PgRecordStore;
pub use supabase::SupabaseRecordStore;

use std::sync::Arc;

use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, Runtime};
use medmatch_core::DoctorRecord;
use thiserror::Error;
use tokio_postgres::NoTls;

use crate::config::DirectoryConfig;

/// Failure reading from the directory
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Supabase error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Record is not a JSON object: {0}")]
    Malformed(String),
}

/// Read-only, query-by-equality access to a table of opaque records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records in `table` whose `column` equals `value` exactly
    async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<DoctorRecord>, StoreError>;

    /// Check that `table` is reachable
    async fn ping(&self, table: &str) -> Result<(), StoreError>;
}

/// Create a connection pool from a database URL
pub fn create_pool(database_url: &str) -> Result<Pool, deadpool_postgres::CreatePoolError> {
    let mut cfg = Config::new();
    cfg.url = Some(database_url.to_string());
    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
}

/// Build the configured record store
pub fn connect(
    directory: &DirectoryConfig,
) -> Result<Arc<dyn RecordStore>, deadpool_postgres::CreatePoolError> {
    match directory {
        DirectoryConfig::Postgres { database_url } => {
            tracing::info!("Using PostgreSQL doctor directory");
            Ok(Arc::new(PgRecordStore::new(create_pool(database_url)?)))
        }
        DirectoryConfig::Supabase { url, key } => {
            tracing::info!(url = %url, "Using Supabase doctor directory");
            Ok(Arc::new(SupabaseRecordStore::new(url.clone(), key.clone())))
        }
    }
}
