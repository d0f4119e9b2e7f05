//! Summary Client: the single entry point for calls to the hosted summarization API.
//!
//! One best-effort request per document with a bounded timeout. No retries: any
//! failure is reported to the caller, which falls back to local analysis.

use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use prompts::build_request_text;

pub const DEFAULT_ENDPOINT: &str = "https://api.sarvam.ai/text-summary/summarize";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summary API key is not configured")]
    MissingCredentials,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("summary API returned no summary")]
    EmptyContent,
}

/// Length hint sent with every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "long" => Ok(SummaryLength::Long),
            other => Err(format!("unknown summary length '{other}'")),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    text: &'a str,
    length: SummaryLength,
}

#[derive(Clone)]
pub struct SummaryClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    length: SummaryLength,
}

impl SummaryClient {
    pub fn new(
        api_key: Option<String>,
        endpoint: String,
        length: SummaryLength,
        timeout: Duration,
    ) -> Result<Self, SummaryError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            endpoint,
            length,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Requests a report for `document`. Every non-success outcome is an error.
    pub async fn summarize(&self, document: &str) -> Result<String, SummaryError> {
        let api_key = self.api_key.as_deref().ok_or(SummaryError::MissingCredentials)?;
        let text = build_request_text(document);
        let body = SummaryRequest {
            text: &text,
            length: self.length,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            return Err(SummaryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let value: Value = serde_json::from_str(&raw)?;
        let summary = extract_summary(&value).ok_or(SummaryError::EmptyContent)?;

        debug!("Summary API returned {} characters", summary.len());
        Ok(summary)
    }
}

/// Reads `summary`, falling back to `result`. Empty strings count as missing.
fn extract_summary(value: &Value) -> Option<String> {
    ["summary", "result"]
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Local stand-in for the hosted API, one route per response shape.

    use std::time::Duration;

    use axum::{
        http::{header, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    pub const TEST_KEY: &str = "test-key";
    pub const STUB_REPORT: &str = "External report";

    async fn ok(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some("Bearer test-key");
        let well_formed = body["length"] == "medium"
            && body["text"]
                .as_str()
                .is_some_and(|t| t.contains("\n\nInstructions: "));
        if authorized && well_formed {
            (StatusCode::OK, Json(json!({ "summary": STUB_REPORT })))
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": "rejected" })))
        }
    }

    async fn slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Json(json!({ "summary": STUB_REPORT }))
    }

    /// Serves the stub on an ephemeral port and returns its base URL.
    pub async fn spawn() -> String {
        let app = Router::new()
            .route("/ok", post(ok))
            .route(
                "/fail",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
            )
            .route("/garbage", post(|| async { "not json" }))
            .route("/empty", post(|| async { Json(json!({ "summary": "", "result": "" })) }))
            .route("/slow", post(slow));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}
