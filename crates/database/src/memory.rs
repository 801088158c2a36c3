//! In-process data source.
//!
//! Rows are stored per resource in their source-table shape (legacy column
//! names included) and go through the same steps the SQL path performs:
//! filter on the source columns, project with aliases, order, limit.

use crate::error::DbError;
use crate::query::{projection, QueryDescriptor};
use crate::source::DataSource;
use async_trait::async_trait;
use core_types::{Resource, Row, SortDirection};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    tables: Arc<RwLock<HashMap<Resource, Vec<Row>>>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row to a resource's backing table.
    pub async fn insert(&self, resource: Resource, row: Row) {
        self.tables.write().await.entry(resource).or_default().push(row);
    }

    /// Makes every subsequent call fail with `DbError::Unavailable`.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }

    async fn check_available(&self) -> Result<(), DbError> {
        match self.failure.read().await.as_ref() {
            Some(message) => Err(DbError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataSource for MemoryDataSource {
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Vec<Row>, DbError> {
        self.check_available().await?;

        let tables = self.tables.read().await;
        let stored = tables.get(&query.resource).map(Vec::as_slice).unwrap_or_default();

        let mut rows: Vec<Row> = stored
            .iter()
            .filter(|row| match &query.filter {
                Some(filter) => row.get(filter.column).is_some_and(|v| as_text(v) == filter.value),
                None => true,
            })
            .map(|row| project(query.resource, row))
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let left = a.get(order.column).unwrap_or(&Value::Null);
                let right = b.get(order.column).unwrap_or(&Value::Null);
                match (left.is_null(), right.is_null()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => match order.direction {
                        SortDirection::Asc => compare(left, right),
                        SortDirection::Desc => compare(right, left),
                    },
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }

        tracing::debug!(resource = %query.resource, rows = rows.len(), "In-memory query completed.");
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.check_available().await
    }
}

/// Mirrors `column::text` in SQL.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Selects the resource's projected columns; columns the row lacks come back
/// as null, like a nullable column would.
fn project(resource: Resource, row: &Row) -> Row {
    resource
        .columns()
        .iter()
        .map(|expr| {
            let (source, output) = projection(*expr);
            (output.to_string(), row.get(source).cloned().unwrap_or(Value::Null))
        })
        .collect()
}

/// Numbers numerically, strings lexicographically (ISO dates sort by time).
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => as_text(a).cmp(&as_text(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    async fn seeded() -> MemoryDataSource {
        let source = MemoryDataSource::new();
        for (animal, date, weight) in [
            ("a1", "2024-01-01", 10.2),
            ("a1", "2024-03-01", 11.0),
            ("a2", "2024-02-01", 4.5),
            ("a1", "2023-12-15", 9.8),
        ] {
            source
                .insert(
                    Resource::Weighings,
                    row(json!({ "id": format!("{animal}-{date}"), "animal_id": animal, "data": date, "peso": weight })),
                )
                .await;
        }
        source
    }

    #[tokio::test]
    async fn filters_orders_and_projects() {
        let source = seeded().await;
        let query = QueryDescriptor::new(Resource::Weighings).by_key("a1").newest_first();

        let rows = source.fetch(&query).await.unwrap();

        let dates: Vec<_> = rows.iter().map(|r| r["data"].as_str().unwrap()).collect();
        assert_eq!(dates, ["2024-03-01", "2024-01-01", "2023-12-15"]);
        assert!(rows.iter().all(|r| !r.contains_key("animal_id")));
    }

    #[tokio::test]
    async fn limit_applies_after_ordering() {
        let source = seeded().await;
        let query = QueryDescriptor::new(Resource::Weighings).by_key("a1").newest_first();

        let latest = source.fetch_one(&query).await.unwrap().unwrap();

        assert_eq!(latest["peso"], 11.0);
    }

    #[tokio::test]
    async fn numeric_ids_match_text_filters() {
        let source = MemoryDataSource::new();
        source.insert(Resource::Animals, row(json!({ "id": 17, "nome": "Bolt" }))).await;

        let found = source
            .fetch_one(&QueryDescriptor::new(Resource::Animals).by_key("17"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found["name"], "Bolt");
        assert_eq!(found["profile_picture_url"], Value::Null);
    }

    #[tokio::test]
    async fn nulls_sort_last_in_both_directions() {
        let source = MemoryDataSource::new();
        for date in [json!(null), json!("2024-05-01"), json!("2024-06-01")] {
            source.insert(Resource::Files, row(json!({ "animal_id": "a1", "data": date }))).await;
        }

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let query = QueryDescriptor::new(Resource::Files).order_by("data", direction);
            let rows = source.fetch(&query).await.unwrap();
            assert!(rows[2]["data"].is_null());
        }
    }

    #[tokio::test]
    async fn empty_table_is_not_an_error() {
        let source = MemoryDataSource::new();
        let rows = source.fetch(&QueryDescriptor::new(Resource::Events)).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn failure_mode_surfaces_errors() {
        let source = seeded().await;
        source.fail_with("connection reset").await;

        let err = source.fetch(&QueryDescriptor::new(Resource::Weighings)).await.unwrap_err();

        assert!(matches!(err, DbError::Unavailable(ref m) if m == "connection reset"));
        assert!(source.ping().await.is_err());
    }
}
