//! HTTP API for triggering meeting Markdown exports
//!
//! This module exposes the export entry points:
//! - POST /meetings - register a meeting snapshot (standalone host seam)
//! - GET /meetings/:id/export_markdown/dialog - export options form
//! - POST /meetings/:id/export_markdown - start an export job
//! - GET /exports/:id/status - export record status
//! - GET /health - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
