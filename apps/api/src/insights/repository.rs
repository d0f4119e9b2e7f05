use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::tokenizer::WordCount;
use crate::models::document::DocumentItem;

/// Fields written for a newly processed upload.
pub struct NewDocument<'a> {
    pub filename: &'a str,
    pub original_name: &'a str,
    pub storage_key: &'a str,
    pub ai_summary: Option<&'a str>,
    pub fallback_words: Option<&'a [WordCount]>,
    pub insight_source: &'a str,
    pub file_size: i64,
}

pub async fn insert_document(pool: &PgPool, doc: NewDocument<'_>) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO documents
            (id, filename, original_name, storage_key, ai_summary, fallback_words,
             insight_source, processing_status, file_size)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'completed', $8)
        "#,
    )
    .bind(id)
    .bind(doc.filename)
    .bind(doc.original_name)
    .bind(doc.storage_key)
    .bind(doc.ai_summary)
    .bind(doc.fallback_words.map(Json))
    .bind(doc.insight_source)
    .bind(doc.file_size)
    .execute(pool)
    .await?;
    Ok(id)
}

/// One page of upload history, newest first.
pub async fn list_documents(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<DocumentItem>> {
    let rows = sqlx::query_as::<_, DocumentItem>(
        r#"
        SELECT id, original_name AS filename, ai_summary, upload_date,
               COALESCE(file_size, 0) AS file_size
        FROM documents
        ORDER BY upload_date DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_documents(pool: &PgPool) -> Result<i64> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Deletes the row and returns its storage key, or `None` if no such document.
pub async fn delete_document(pool: &PgPool, id: Uuid) -> Result<Option<String>> {
    let key: Option<(String,)> =
        sqlx::query_as("DELETE FROM documents WHERE id = $1 RETURNING storage_key")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(key.map(|(k,)| k))
}
