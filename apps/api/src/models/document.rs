use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Upload history entry as listed by `GET /insights`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentItem {
    pub id: Uuid,
    pub filename: String,
    pub ai_summary: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub file_size: i64,
}
