use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to the database: {0}")]
    ConnectionError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Database call exceeded the {0:?} timeout.")]
    Timeout(Duration),

    #[error("The database returned a row that is not a JSON object: {0}")]
    UnexpectedRow(String),

    #[error("The data source is unavailable: {0}")]
    Unavailable(String),
}
