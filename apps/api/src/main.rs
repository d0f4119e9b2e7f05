mod analysis;
mod config;
mod db;
mod errors;
mod insights;
mod models;
mod routes;
mod state;
mod summary_client;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::params::AnalysisParams;
use crate::analysis::InsightEngine;
use crate::config::Config;
use crate::db::{create_pool, initialize_schema};
use crate::insights::pipeline::InsightPipeline;
use crate::insights::storage::UploadStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::summary_client::SummaryClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Insight API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    initialize_schema(&db).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let uploads = UploadStore::new(s3, config.s3_bucket.clone());
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize external summarization client
    let summary = SummaryClient::new(
        config.summary_api_key.clone(),
        config.summary_api_url.clone(),
        config.summary_length,
        Duration::from_secs(config.summary_timeout_secs),
    )?;
    if summary.is_configured() {
        info!("Summary client initialized ({})", config.summary_api_url);
    } else {
        warn!("SUMMARY_API_KEY not set; using local insight reports only");
    }

    // Local analysis engine backs every tier after the external one
    let engine = Arc::new(
        InsightEngine::new(AnalysisParams::default()).context("Failed to compile analysis patterns")?,
    );
    let pipeline = InsightPipeline::standard(summary, engine);
    info!("Insight tiers: {}", pipeline.tier_names().join(" -> "));

    let cors = build_cors(&config.allowed_origins)?;

    // Build app state
    let state = AppState {
        db,
        uploads,
        pipeline: Arc::new(pipeline),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "insight-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}

/// Restricts browser access to the configured front-end origins.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any))
}
