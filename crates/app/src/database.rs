//! Database connection management

use sqlx::{PgPool, raw_sql};

/// Idempotent statements creating the purchases table and its indexes.
pub const SCHEMA_SQL: &str = include_str!("sql/schema.sql");

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Create the purchases table and indexes when they do not exist yet.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    raw_sql(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}
