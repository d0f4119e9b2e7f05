pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::insights::handlers;
use crate::state::AppState;

/// Headroom above the file limit for multipart framing, so oversized files
/// reach the size check instead of failing mid-stream.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload-resume", post(handlers::handle_upload))
        .route("/insights", get(handlers::handle_list_insights))
        .route("/documents/:id", delete(handlers::handle_delete_document))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
