pub mod health;
pub mod parser;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/parser/parse-resume",
            post(parser::handle_parse_resume),
        )
        .route("/api/parser/parse-text", post(parser::handle_parse_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
