use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_DOCUMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id                UUID PRIMARY KEY,
    filename          TEXT NOT NULL,
    original_name     TEXT NOT NULL,
    storage_key       TEXT NOT NULL,
    ai_summary        TEXT,
    fallback_words    JSONB,
    insight_source    TEXT NOT NULL,
    processing_status TEXT NOT NULL DEFAULT 'completed',
    upload_date       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    file_size         BIGINT
)
"#;

const CREATE_UPLOAD_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_upload_date_idx ON documents (upload_date DESC)";

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `documents` table and its index if they do not exist yet.
pub async fn initialize_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_DOCUMENTS)
        .execute(pool)
        .await
        .context("Failed to create documents table")?;
    sqlx::query(CREATE_UPLOAD_DATE_INDEX)
        .execute(pool)
        .await
        .context("Failed to create upload_date index")?;
    info!("Database schema ready");
    Ok(())
}
