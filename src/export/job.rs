use super::markdown::{clean_filename, render_markdown, MARKDOWN_CONTENT_TYPE};
use super::options::ExportOptions;
use super::record::{ExportRecord, ExportRecordStore, ExportStatus};
use crate::attachment::AttachmentStore;
use crate::i18n::Messages;
use crate::meeting::MeetingRepository;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Background export job wrapper
///
/// Each enqueued export creates one record, then runs as one spawned task
/// to completion: re-fetch the meeting snapshot, render, store the document
/// as an attachment, and report terminal status on the record exactly once.
/// Exports share no mutable state with each other.
pub struct ExportService {
    meetings: Arc<dyn MeetingRepository>,
    records: Arc<dyn ExportRecordStore>,
    attachments: Arc<dyn AttachmentStore>,
    messages: Arc<dyn Messages>,

    /// Handles for in-flight export tasks (record id -> handle); each task
    /// removes its own entry when it finishes
    tasks: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl ExportService {
    /// Build the service, probing record storage capability once up front
    pub async fn new(
        meetings: Arc<dyn MeetingRepository>,
        records: Arc<dyn ExportRecordStore>,
        attachments: Arc<dyn AttachmentStore>,
        messages: Arc<dyn Messages>,
    ) -> Self {
        if !records.dedicated_table_available().await {
            warn!("Dedicated export table unavailable, writing records to the shared exports table");
        }

        Self {
            meetings,
            records,
            attachments,
            messages,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create an export record and spawn the export task
    ///
    /// Callers must have verified the meeting exists before enqueueing; a
    /// snapshot that disappears between that check and the task run is
    /// reported as a job failure, not an error here.
    pub async fn enqueue(
        &self,
        meeting_id: Uuid,
        requested_by: &str,
        options: ExportOptions,
    ) -> Result<Uuid> {
        let record = ExportRecord::new(requested_by);
        let record_id = record.id;

        self.records
            .create(record)
            .await
            .context("Failed to create export record")?;

        info!("Queued markdown export {} for meeting {}", record_id, meeting_id);

        let meetings = Arc::clone(&self.meetings);
        let records = Arc::clone(&self.records);
        let attachments = Arc::clone(&self.attachments);
        let messages = Arc::clone(&self.messages);
        let tasks = Arc::clone(&self.tasks);

        // Hold the map lock across the spawn so the task's self-removal
        // cannot run before its handle is inserted.
        let mut guard = self.tasks.lock().await;
        let handle = tokio::spawn(async move {
            if let Err(e) =
                run_export(meetings, records, attachments, messages, record_id, meeting_id, options)
                    .await
            {
                error!("Export {} aborted: {:#}", record_id, e);
            }
            tasks.lock().await.remove(&record_id);
        });
        guard.insert(record_id, handle);

        Ok(record_id)
    }

    /// Current record for an export attempt
    pub async fn status(&self, id: Uuid) -> Result<Option<ExportRecord>> {
        self.records.find(id).await
    }

    /// Wait for an export task to finish (used by tests and shutdown)
    ///
    /// A handle that is already gone means the task has finished and
    /// reaped itself.
    pub async fn wait(&self, id: Uuid) -> Result<()> {
        let handle = {
            let mut tasks = self.tasks.lock().await;
            tasks.remove(&id)
        };

        if let Some(handle) = handle {
            handle.await.context("Export task panicked")?;
        }
        Ok(())
    }

    /// Number of export tasks that have not finished yet
    pub async fn in_flight(&self) -> usize {
        self.tasks.lock().await.len()
    }
}

/// One export run, start to terminal status
async fn run_export(
    meetings: Arc<dyn MeetingRepository>,
    records: Arc<dyn ExportRecordStore>,
    attachments: Arc<dyn AttachmentStore>,
    messages: Arc<dyn Messages>,
    record_id: Uuid,
    meeting_id: Uuid,
    options: ExportOptions,
) -> Result<()> {
    records.update_status(record_id, ExportStatus::Running).await?;

    // Fresh, fully loaded snapshot; the request-time check has already
    // passed, so a miss here means the meeting vanished in between.
    let meeting = match meetings.find_visible(meeting_id).await? {
        Some(meeting) => meeting,
        None => {
            warn!("Meeting {} disappeared before export {} ran", meeting_id, record_id);
            let status = ExportStatus::Failure {
                message: messages.export_failed("meeting no longer exists"),
            };
            records.update_status(record_id, status).await?;
            return Ok(());
        }
    };

    let document = render_markdown(&meeting, &options, messages.as_ref());
    let filename = clean_filename(&meeting.title);

    match attachments
        .create(&filename, MARKDOWN_CONTENT_TYPE, document.as_bytes())
        .await
    {
        Ok(attachment) => {
            info!("Export {} finished: {}", record_id, attachment.download_path);
            let status = ExportStatus::Success {
                download_path: attachment.download_path,
                filename: attachment.filename,
                content_type: attachment.content_type,
                message: messages.export_succeeded(),
            };
            records.update_status(record_id, status).await?;
        }
        Err(e) => {
            error!("Export {} failed to store attachment: {:#}", record_id, e);
            let status = ExportStatus::Failure {
                message: messages.export_failed(&format!("{:#}", e)),
            };
            records.update_status(record_id, status).await?;
        }
    }

    Ok(())
}
