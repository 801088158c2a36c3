use crate::error::DbError;
use crate::query::QueryDescriptor;
use crate::source::DataSource;
use async_trait::async_trait;
use core_types::Row;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPool;
use std::future::Future;
use std::time::Duration;

/// The `DbRepository` answers reads against PostgreSQL. It encapsulates all
/// SQL execution; the statements themselves come from `QueryDescriptor`.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    /// Bounds a database call by the configured per-call timeout.
    async fn timed<T, F>(&self, call: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.query_timeout, call)
            .await
            .map_err(|_| DbError::Timeout(self.query_timeout))?
            .map_err(DbError::from)
    }
}

#[async_trait]
impl DataSource for DbRepository {
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Vec<Row>, DbError> {
        let sql = query.to_sql();
        let mut statement = sqlx::query_scalar::<_, JsonValue>(&sql);
        if let Some(filter) = &query.filter {
            statement = statement.bind(filter.value.as_str());
        }

        let values = self.timed(statement.fetch_all(&self.pool)).await?;
        tracing::debug!(resource = %query.resource, rows = values.len(), "Query completed.");

        values.into_iter().map(into_row).collect()
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.timed(sqlx::query("SELECT 1").execute(&self.pool)).await?;
        Ok(())
    }
}

fn into_row(value: JsonValue) -> Result<Row, DbError> {
    match value {
        JsonValue::Object(row) => Ok(row),
        other => Err(DbError::UnexpectedRow(other.to_string())),
    }
}
