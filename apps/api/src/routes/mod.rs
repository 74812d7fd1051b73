pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Headroom above `max_pdf_bytes` for multipart boundaries and the JD text part.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let pdf_body_limit = state.config.max_pdf_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Skills API
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route("/api/v1/skills/extract", post(handlers::handle_extract_skills))
        .route("/api/v1/skills/:name", get(handlers::handle_get_skill))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/pdf",
            post(handlers::handle_analyze_pdf).layer(DefaultBodyLimit::max(pdf_body_limit)),
        )
        .with_state(state)
}
