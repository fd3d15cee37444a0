use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Meeting registration (standalone host seam)
        .route("/meetings", post(handlers::register_meeting))
        // Export dialog and trigger
        .route(
            "/meetings/:meeting_id/export_markdown/dialog",
            get(handlers::export_dialog),
        )
        .route(
            "/meetings/:meeting_id/export_markdown",
            post(handlers::start_export),
        )
        // Export status
        .route("/exports/:export_id/status", get(handlers::export_status))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
