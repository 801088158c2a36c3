use crate::error::DbError;
use crate::query::QueryDescriptor;
use async_trait::async_trait;
use core_types::Row;

/// A read-only source of shelter records.
///
/// Implementations return rows in the order the descriptor asks for and never
/// treat "no rows" as an error.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Runs one read and returns every matching row.
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Vec<Row>, DbError>;

    /// Runs one read limited to a single row. `None` means nothing matched.
    async fn fetch_one(&self, query: &QueryDescriptor) -> Result<Option<Row>, DbError> {
        let query = query.clone().limit(1);
        Ok(self.fetch(&query).await?.into_iter().next())
    }

    /// Checks that the source can currently serve reads.
    async fn ping(&self) -> Result<(), DbError>;
}
