use super::state::AppState;
use crate::export::{ExportOptions, RawToggle};
use crate::meeting::{Meeting, MeetingRepository};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect},
};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterMeetingResponse {
    pub meeting_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct StartExportResponse {
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DialogOption {
    pub name: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportDialogResponse {
    pub meeting_id: Uuid,
    pub title: String,
    pub options: Vec<DialogOption>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /meetings
/// Register a meeting snapshot (host-data seam for standalone operation)
pub async fn register_meeting(
    State(state): State<AppState>,
    Json(meeting): Json<Meeting>,
) -> impl IntoResponse {
    let meeting_id = meeting.id;
    state.meetings.insert(meeting).await;

    info!("Registered meeting {}", meeting_id);

    (StatusCode::CREATED, Json(RegisterMeetingResponse { meeting_id }))
}

/// GET /meetings/:meeting_id/export_markdown/dialog
/// Describe the export options form for one meeting
pub async fn export_dialog(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
) -> impl IntoResponse {
    let meeting = match state.meetings.find_visible(meeting_id).await {
        Ok(Some(meeting)) => meeting,
        Ok(None) => return meeting_not_found(meeting_id),
        Err(e) => {
            error!("Failed to load meeting {}: {:#}", meeting_id, e);
            return internal_error(&e);
        }
    };

    let defaults = ExportOptions::default();

    (
        StatusCode::OK,
        Json(ExportDialogResponse {
            meeting_id,
            title: meeting.title,
            options: vec![
                DialogOption {
                    name: "md_include_participants".to_string(),
                    label: state.messages.include_participants_label(),
                    checked: defaults.include_participants,
                },
                DialogOption {
                    name: "md_include_outcomes".to_string(),
                    label: state.messages.include_outcomes_label(),
                    checked: defaults.include_outcomes,
                },
            ],
        }),
    )
        .into_response()
}

/// POST /meetings/:meeting_id/export_markdown
/// Start a background export; responds with the job id as JSON when the
/// caller accepts JSON, otherwise redirects to the job-status page.
pub async fn start_export(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // Verify the meeting before any record or job is created
    match state.meetings.find_visible(meeting_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return meeting_not_found(meeting_id),
        Err(e) => {
            error!("Failed to load meeting {}: {:#}", meeting_id, e);
            return internal_error(&e);
        }
    }

    let options = ExportOptions::from_raw(
        toggle_param(&params, "md_include_participants", "participants"),
        toggle_param(&params, "md_include_outcomes", "outcomes"),
    );

    let job_id = match state.exports.enqueue(meeting_id, "anonymous", options).await {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to enqueue export for meeting {}: {:#}", meeting_id, e);
            return internal_error(&e);
        }
    };

    info!("Started markdown export {} for meeting {}", job_id, meeting_id);

    if accepts_json(&headers) {
        (StatusCode::OK, Json(StartExportResponse { job_id })).into_response()
    } else {
        Redirect::to(&format!("/exports/{}/status", job_id)).into_response()
    }
}

/// GET /exports/:export_id/status
/// Current record for one export attempt
pub async fn export_status(
    State(state): State<AppState>,
    Path(export_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.exports.status(export_id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Export {} not found", export_id),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to load export {}: {:#}", export_id, e);
            internal_error(&e)
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Helpers
// ============================================================================

/// Collect one checkbox option from the query pairs
///
/// The dialog submits prefixed names (`md_include_*`); the plain name is
/// accepted as well, with the prefixed form winning when both appear.
/// Repeated keys become a list so checkbox/hidden-fallback pairs survive
/// extraction.
fn toggle_param(params: &[(String, String)], preferred: &str, plain: &str) -> Option<RawToggle> {
    for key in [preferred, plain] {
        let values: Vec<String> = params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect();

        match values.len() {
            0 => continue,
            1 => return values.into_iter().next().map(RawToggle::One),
            _ => return Some(RawToggle::Many(values)),
        }
    }
    None
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

fn meeting_not_found(meeting_id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Meeting {} not found", meeting_id),
        }),
    )
        .into_response()
}

fn internal_error(e: &anyhow::Error) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("{:#}", e),
        }),
    )
        .into_response()
}
