use async_trait::async_trait;
use deadpool_postgres::Pool;
use medmatch_core::DoctorRecord;
use serde_json::Value as JsonValue;

use super::{RecordStore, StoreError};

/// Record store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgRecordStore {
    pool: Pool,
}

impl PgRecordStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

/// Quote an SQL identifier, doubling embedded quotes
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<DoctorRecord>, StoreError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT to_jsonb(t) FROM {} t WHERE t.{}::text = $1",
            quote_ident(table),
            quote_ident(column)
        );
        let rows = client.query(&sql, &[&value]).await?;

        rows.into_iter()
            .map(|row| {
                let data: JsonValue = row.try_get(0)?;
                DoctorRecord::try_from(data).map_err(|v| StoreError::Malformed(v.to_string()))
            })
            .collect()
    }

    async fn ping(&self, table: &str) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client
            .query(&format!("SELECT 1 FROM {} LIMIT 1", quote_ident(table)), &[])
            .await?;
        Ok(())
    }
}
