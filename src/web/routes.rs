use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

// API Routes - REST API for the display surface
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().nest(
        "/api",
        Router::new()
            // Natural-language question -> SQL -> rows
            .route("/ask", post(handlers::ask))
            // Raw SQL passthrough
            .route("/query", post(handlers::execute_query))
            // System status
            .route("/status", get(handlers::system_status)),
    )
}
