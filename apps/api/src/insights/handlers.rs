//! Axum route handlers for document upload and upload history.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::tokenizer::WordCount;
use crate::errors::AppError;
use crate::insights::extract::{extract_text, DocumentFormat};
use crate::insights::pipeline::InsightOutcome;
use crate::insights::repository::{self, NewDocument};
use crate::insights::storage::upload_key;
use crate::models::document::DocumentItem;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub ai_summary: Option<String>,
    pub fallback_words: Option<Vec<WordCount>>,
    pub insight_source: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub documents: Vec<DocumentItem>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: String,
    pub id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload-resume
///
/// Extracts the text, runs the insight fallback chain, then stores the upload and
/// its row. An upload whose row cannot be written is removed again.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (filename, bytes) = read_upload(multipart).await?;
    let format = validate_upload(&filename, bytes.len(), state.config.max_file_size)?;
    let file_size = bytes.len() as i64;
    info!("Received upload '{}' ({} bytes)", filename, file_size);

    // Nothing is stored until the document has yielded an insight.
    let extract_bytes = bytes.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(format, &extract_bytes))
        .await
        .unwrap_or_else(|e| {
            warn!("Text extraction task failed: {e}");
            None
        })
        .ok_or_else(|| {
            AppError::UnprocessableEntity("Unable to extract text from document".to_string())
        })?;

    let result = state.pipeline.run(&text).await.ok_or_else(|| {
        AppError::UnprocessableEntity("No insight could be produced for this document".to_string())
    })?;
    let (ai_summary, fallback_words) = outcome_fields(result.outcome);

    let key = upload_key(&filename, Utc::now().timestamp_millis());
    state
        .uploads
        .put(&key, bytes, format.content_type())
        .await?;

    let stored_name = key.rsplit('/').next().unwrap_or(&key);
    let inserted = repository::insert_document(
        &state.db,
        NewDocument {
            filename: stored_name,
            original_name: &filename,
            storage_key: &key,
            ai_summary: ai_summary.as_deref(),
            fallback_words: stored_words(fallback_words.as_deref()),
            insight_source: result.source,
            file_size,
        },
    )
    .await;
    let id = match inserted {
        Ok(id) => id,
        Err(e) => {
            if let Err(cleanup) = state.uploads.delete(&key).await {
                warn!("Upload {key} left without a document row: {cleanup}");
            }
            return Err(e.into());
        }
    };

    info!("Document {id} processed via '{}'", result.source);

    Ok(Json(UploadResponse {
        id,
        filename,
        ai_summary,
        fallback_words,
        insight_source: result.source.to_string(),
        status: "success".to_string(),
    }))
}

/// GET /insights?limit=&offset=
pub async fn handle_list_insights(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<InsightsResponse>, AppError> {
    let (limit, offset) = clamp_page(page.limit, page.offset);
    let total = repository::count_documents(&state.db).await?;
    let documents = repository::list_documents(&state.db, limit, offset).await?;
    Ok(Json(InsightsResponse { documents, total }))
}

/// DELETE /documents/:id
///
/// Removes the row first; the stored object is deleted best-effort.
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let key = repository::delete_document(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    if let Err(e) = state.uploads.delete(&key).await {
        warn!("Document {id} deleted but its upload was not: {e}");
    }

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        id,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        return Ok((filename, bytes));
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

fn validate_upload(filename: &str, size: usize, max_size: usize) -> Result<DocumentFormat, AppError> {
    let format = DocumentFormat::from_filename(filename).ok_or_else(|| {
        AppError::Validation("Only PDF and plain-text (.txt, .md) files are supported".to_string())
    })?;
    if size > max_size {
        return Err(AppError::Validation(format!(
            "File too large. Max {}MB",
            max_size / (1024 * 1024)
        )));
    }
    Ok(format)
}

fn clamp_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        offset.unwrap_or(0).max(0),
    )
}

/// Exactly one of the report text or the word list is populated.
fn outcome_fields(outcome: InsightOutcome) -> (Option<String>, Option<Vec<WordCount>>) {
    match outcome {
        InsightOutcome::Report(report) => (Some(report), None),
        InsightOutcome::TopWords(words) => (None, Some(words)),
    }
}

/// Empty word lists are stored as NULL.
fn stored_words(words: Option<&[WordCount]>) -> Option<&[WordCount]> {
    words.filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: usize = 1024 * 1024;

    #[test]
    fn test_validate_upload_accepts_supported_formats() {
        assert_eq!(
            validate_upload("resume.pdf", 1000, 10 * MB).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            validate_upload("notes.md", 10, 10 * MB).unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_validate_upload_rejects_unsupported_extension() {
        let err = validate_upload("resume.docx", 10, 10 * MB).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_upload_rejects_oversized() {
        match validate_upload("resume.pdf", 10 * MB + 1, 10 * MB) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "File too large. Max 10MB"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(None, None), (10, 0));
        assert_eq!(clamp_page(Some(0), Some(-5)), (1, 0));
        assert_eq!(clamp_page(Some(500), Some(20)), (100, 20));
    }

    #[test]
    fn test_empty_word_list_is_stored_as_null() {
        assert_eq!(stored_words(Some(&[])), None);
        assert_eq!(stored_words(None), None);
        let words = [WordCount {
            word: "rust".into(),
            count: 1,
        }];
        assert_eq!(stored_words(Some(&words)), Some(&words[..]));
    }

    #[test]
    fn test_outcome_fields() {
        assert_eq!(
            outcome_fields(InsightOutcome::Report("r".into())),
            (Some("r".to_string()), None)
        );
        assert_eq!(
            outcome_fields(InsightOutcome::TopWords(vec![])),
            (None, Some(vec![]))
        );
        let words = vec![WordCount {
            word: "rust".into(),
            count: 3,
        }];
        assert_eq!(
            outcome_fields(InsightOutcome::TopWords(words.clone())),
            (None, Some(words))
        );
    }
}
