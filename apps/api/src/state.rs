use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::insights::pipeline::InsightPipeline;
use crate::insights::storage::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub uploads: UploadStore,
    /// Ordered insight tiers: external service first, word counts last.
    pub pipeline: Arc<InsightPipeline>,
    pub config: Config,
}
