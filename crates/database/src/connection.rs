use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Establishes a connection pool to the PostgreSQL database.
///
/// Each request borrows a connection from this pool for the duration of one
/// query and hands it back, so the pool is the only resource shared between
/// requests.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    tracing::info!(url = %settings.redacted_url(), "Connecting to the database.");

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect(&settings.url)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    Ok(pool)
}

/// Creates the shelter tables and views if they do not exist yet.
///
/// Only needed for fresh databases; production stores usually own their schema.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
