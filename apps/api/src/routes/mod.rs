pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Also exposed under /api for reverse proxies that only forward that prefix
        .route("/api/health", get(health::health_handler))
        // Upload flow: queue, then poll
        .route("/api/v1/analyze", post(jobs::handle_analyze))
        .route("/api/v1/status/:job_id", get(jobs::handle_status))
        // Text-only flow
        .route("/api/v1/analyze/text", post(analysis::handle_analyze_text))
        .route("/api/v1/parse/jd", post(analysis::handle_parse_jd))
        .route("/api/v1/parse/resume", post(analysis::handle_parse_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
