// Integration tests for the HTTP export endpoints
//
// The router is exercised in-process with tower's oneshot; the export
// service is shared with the test so it can await job completion.

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use meeting_markdown_export::{
    AgendaItem, AppState, DefaultMessages, ExportService, FsAttachmentStore, InMemoryExportStore,
    InMemoryMeetings, Meeting, Messages, Outcome, Participant,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

struct Harness {
    router: Router,
    meetings: Arc<InMemoryMeetings>,
    exports: Arc<ExportService>,
    _attachments_dir: TempDir,
    attachments_root: PathBuf,
}

async fn harness() -> Result<Harness> {
    let attachments_dir = TempDir::new()?;
    let attachments_root = attachments_dir.path().to_path_buf();

    let meetings = Arc::new(InMemoryMeetings::new());
    let records = Arc::new(InMemoryExportStore::new(true));
    let attachments = Arc::new(FsAttachmentStore::new(&attachments_root));
    let messages: Arc<dyn Messages> = Arc::new(DefaultMessages);
    let exports = Arc::new(
        ExportService::new(meetings.clone(), records, attachments, messages.clone()).await,
    );

    let router = meeting_markdown_export::create_router(AppState::new(
        meetings.clone(),
        exports.clone(),
        messages,
    ));

    Ok(Harness {
        router,
        meetings,
        exports,
        _attachments_dir: attachments_dir,
        attachments_root,
    })
}

fn sample_meeting() -> Meeting {
    Meeting {
        id: Uuid::new_v4(),
        title: "Test Meeting".to_string(),
        project_name: "Test Project".to_string(),
        start_time: DateTime::parse_from_rfc3339("2024-12-31T13:30:00+00:00").unwrap(),
        duration_minutes: 60,
        location: Some("Room 101".to_string()),
        agenda_items: vec![AgendaItem {
            position: 1,
            title: "Agenda Item 1".to_string(),
            display_title: None,
            notes: None,
            outcomes: vec![Outcome::Note {
                notes: "Important decision made".to_string(),
            }],
        }],
        participants: vec![Participant {
            user_name: "Alice Example".to_string(),
        }],
    }
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_check_responds_ok() -> Result<()> {
    let h = harness().await?;
    let response = h
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn register_meeting_round_trips_through_the_dialog() -> Result<()> {
    let h = harness().await?;
    let meeting = sample_meeting();
    let meeting_id = meeting.id;

    let response = h
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/meetings")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&meeting)?))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = h
        .router
        .oneshot(
            Request::builder()
                .uri(format!("/meetings/{}/export_markdown/dialog", meeting_id))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await?;
    assert_eq!(json["title"], "Test Meeting");
    assert_eq!(json["options"][0]["name"], "md_include_participants");
    assert_eq!(json["options"][0]["label"], "Include participants");
    assert_eq!(json["options"][0]["checked"], true);
    assert_eq!(json["options"][1]["name"], "md_include_outcomes");
    assert_eq!(json["options"][1]["label"], "Include outcomes");
    Ok(())
}

#[tokio::test]
async fn dialog_labels_go_through_the_message_catalog() -> Result<()> {
    struct German;

    impl Messages for German {
        fn include_participants_label(&self) -> String {
            "Teilnehmende aufnehmen".to_string()
        }

        fn include_outcomes_label(&self) -> String {
            "Ergebnisse aufnehmen".to_string()
        }
    }

    let attachments_dir = TempDir::new()?;
    let meetings = Arc::new(InMemoryMeetings::new());
    let records = Arc::new(InMemoryExportStore::new(true));
    let attachments = Arc::new(FsAttachmentStore::new(attachments_dir.path()));
    let messages: Arc<dyn Messages> = Arc::new(German);
    let exports = Arc::new(
        ExportService::new(meetings.clone(), records, attachments, messages.clone()).await,
    );
    let router = meeting_markdown_export::create_router(AppState::new(
        meetings.clone(),
        exports,
        messages,
    ));

    let meeting = sample_meeting();
    let meeting_id = meeting.id;
    meetings.insert(meeting).await;

    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/meetings/{}/export_markdown/dialog", meeting_id))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await?;
    assert_eq!(json["options"][0]["label"], "Teilnehmende aufnehmen");
    assert_eq!(json["options"][1]["label"], "Ergebnisse aufnehmen");
    Ok(())
}

#[tokio::test]
async fn unknown_meeting_is_not_found_for_dialog_and_export() -> Result<()> {
    let h = harness().await?;
    let missing = Uuid::new_v4();

    let response = h
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/meetings/{}/export_markdown/dialog", missing))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = h
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/meetings/{}/export_markdown", missing))
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn json_caller_gets_a_job_id_and_terminal_status() -> Result<()> {
    let h = harness().await?;
    let meeting = sample_meeting();
    let meeting_id = meeting.id;
    h.meetings.insert(meeting).await;

    let response = h
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/meetings/{}/export_markdown", meeting_id))
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await?;
    let job_id: Uuid = json["job_id"].as_str().expect("job id").parse()?;

    h.exports.wait(job_id).await?;

    let response = h
        .router
        .oneshot(
            Request::builder()
                .uri(format!("/exports/{}/status", job_id))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await?;
    assert_eq!(json["status"]["status"], "success");
    assert_eq!(json["kind"], "meeting-markdown");
    assert_eq!(json["status"]["content_type"], "text/markdown");
    assert_eq!(json["status"]["filename"], "Test Meeting.md");
    Ok(())
}

#[tokio::test]
async fn browser_caller_is_redirected_to_the_status_page() -> Result<()> {
    let h = harness().await?;
    let meeting = sample_meeting();
    let meeting_id = meeting.id;
    h.meetings.insert(meeting).await;

    let response = h
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/meetings/{}/export_markdown", meeting_id))
                .body(Body::empty())?,
        )
        .await?;
    assert!(response.status().is_redirection());

    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()?;
    assert!(location.starts_with("/exports/"));
    assert!(location.ends_with("/status"));
    Ok(())
}

#[tokio::test]
async fn checkbox_fallback_pairs_are_normalized_end_to_end() -> Result<()> {
    let h = harness().await?;
    let meeting = sample_meeting();
    let meeting_id = meeting.id;
    h.meetings.insert(meeting).await;

    // Checked participants box (checkbox + hidden fallback), outcomes off
    let uri = format!(
        "/meetings/{}/export_markdown?md_include_participants=1&md_include_participants=0&md_include_outcomes=0",
        meeting_id
    );
    let response = h
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await?;
    let job_id: Uuid = json["job_id"].as_str().expect("job id").parse()?;
    h.exports.wait(job_id).await?;

    let document = stored_document(&h.attachments_root, "Test Meeting.md")?;
    assert!(document.contains("## Participants"));
    assert!(document.contains("- Alice Example"));
    assert!(!document.contains("**Outcomes:**"));
    assert!(!document.contains("Important decision made"));
    Ok(())
}

#[tokio::test]
async fn prefixed_option_names_win_over_plain_names() -> Result<()> {
    let h = harness().await?;
    let meeting = sample_meeting();
    let meeting_id = meeting.id;
    h.meetings.insert(meeting).await;

    // Both forms present: the md_include_* value must be the one applied
    let uri = format!(
        "/meetings/{}/export_markdown?participants=1&md_include_participants=0&outcomes=1&md_include_outcomes=0",
        meeting_id
    );
    let response = h
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await?;
    let job_id: Uuid = json["job_id"].as_str().expect("job id").parse()?;
    h.exports.wait(job_id).await?;

    let document = stored_document(&h.attachments_root, "Test Meeting.md")?;
    assert!(!document.contains("## Participants"));
    assert!(!document.contains("**Outcomes:**"));
    Ok(())
}

#[tokio::test]
async fn unknown_export_id_is_not_found() -> Result<()> {
    let h = harness().await?;
    let response = h
        .router
        .oneshot(
            Request::builder()
                .uri(format!("/exports/{}/status", Uuid::new_v4()))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

fn stored_document(root: &PathBuf, filename: &str) -> Result<String> {
    for entry in std::fs::read_dir(root)? {
        let candidate = entry?.path().join(filename);
        if candidate.exists() {
            return Ok(std::fs::read_to_string(candidate)?);
        }
    }
    anyhow::bail!("no attachment named {} under {}", filename, root.display())
}
