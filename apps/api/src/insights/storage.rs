use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Prefix for every stored upload.
const UPLOAD_PREFIX: &str = "uploads";

/// Uploaded originals, kept in an S3 bucket (MinIO locally).
#[derive(Clone)]
pub struct UploadStore {
    client: S3Client,
    bucket: String,
}

impl UploadStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to store {key}: {e}")))?;
        debug!("Stored upload at s3://{}/{}", self.bucket, key);
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete {key}: {e}")))?;
        Ok(())
    }
}

/// `uploads/<millis>_<filename>`, with anything outside `[A-Za-z0-9._-]` replaced.
pub fn upload_key(filename: &str, unix_millis: i64) -> String {
    format!("{UPLOAD_PREFIX}/{unix_millis}_{}", sanitize_filename(filename))
}

fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
