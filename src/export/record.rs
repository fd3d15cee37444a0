use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

/// Type discriminator kept on every record so meeting-markdown exports stay
/// identifiable even when they land in the shared exports table.
pub const EXPORT_KIND: &str = "meeting-markdown";

/// Terminal and intermediate status of one export attempt
///
/// Lifecycle is `created -> running -> {success, failure}`; the terminal
/// transition happens exactly once and no cancellation is surfaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportStatus {
    Created,
    Running,
    Success {
        /// Path the finished document can be downloaded from
        download_path: String,
        filename: String,
        content_type: String,
        message: String,
    },
    Failure {
        message: String,
    },
}

impl ExportStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportStatus::Success { .. } | ExportStatus::Failure { .. })
    }
}

/// Durable marker of one export attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: Uuid,
    pub kind: String,
    pub requested_by: String,
    pub created_at: DateTime<Utc>,
    pub status: ExportStatus,
}

impl ExportRecord {
    pub fn new(requested_by: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: EXPORT_KIND.to_string(),
            requested_by: requested_by.to_string(),
            created_at: Utc::now(),
            status: ExportStatus::Created,
        }
    }
}

/// Which backing table holds a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTable {
    /// The plugin's own export table
    Dedicated,
    /// The host's shared exports table, used when the dedicated table is
    /// absent (deployment/migration mismatch)
    Shared,
}

/// Seam to the host's export record storage
///
/// `dedicated_table_available` is a capability probe meant to be checked
/// once when the export service is built, so the shared-table fallback is
/// an explicit routing decision rather than error-driven control flow.
#[async_trait]
pub trait ExportRecordStore: Send + Sync {
    async fn dedicated_table_available(&self) -> bool;

    async fn create(&self, record: ExportRecord) -> Result<()>;

    /// Apply the one-shot status transition; fails for unknown ids.
    /// Updates to records already in a terminal state are dropped.
    async fn update_status(&self, id: Uuid, status: ExportStatus) -> Result<()>;

    async fn find(&self, id: Uuid) -> Result<Option<ExportRecord>>;
}

/// In-memory export record store
///
/// Models the two host tables as separate maps; constructing it with
/// `dedicated: false` simulates a deployment where the plugin migration
/// has not run.
pub struct InMemoryExportStore {
    dedicated: Option<RwLock<HashMap<Uuid, ExportRecord>>>,
    shared: RwLock<HashMap<Uuid, ExportRecord>>,
}

impl InMemoryExportStore {
    pub fn new(dedicated: bool) -> Self {
        Self {
            dedicated: dedicated.then(|| RwLock::new(HashMap::new())),
            shared: RwLock::new(HashMap::new()),
        }
    }

    /// Which table a record ended up in, if it exists at all
    pub async fn table_of(&self, id: Uuid) -> Option<ExportTable> {
        if let Some(dedicated) = &self.dedicated {
            if dedicated.read().await.contains_key(&id) {
                return Some(ExportTable::Dedicated);
            }
        }
        if self.shared.read().await.contains_key(&id) {
            return Some(ExportTable::Shared);
        }
        None
    }
}

/// Apply a status transition, keeping terminal states final
fn apply_status(record: &mut ExportRecord, status: ExportStatus) {
    if record.status.is_terminal() {
        warn!(
            "Ignoring status update for export {}: already terminal",
            record.id
        );
        return;
    }
    record.status = status;
}

#[async_trait]
impl ExportRecordStore for InMemoryExportStore {
    async fn dedicated_table_available(&self) -> bool {
        self.dedicated.is_some()
    }

    async fn create(&self, record: ExportRecord) -> Result<()> {
        match &self.dedicated {
            Some(dedicated) => {
                dedicated.write().await.insert(record.id, record);
            }
            None => {
                self.shared.write().await.insert(record.id, record);
            }
        }
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: ExportStatus) -> Result<()> {
        if let Some(dedicated) = &self.dedicated {
            if let Some(record) = dedicated.write().await.get_mut(&id) {
                apply_status(record, status);
                return Ok(());
            }
        }
        if let Some(record) = self.shared.write().await.get_mut(&id) {
            apply_status(record, status);
            return Ok(());
        }
        bail!("export record {} not found", id)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ExportRecord>> {
        if let Some(dedicated) = &self.dedicated {
            if let Some(record) = dedicated.read().await.get(&id) {
                return Ok(Some(record.clone()));
            }
        }
        Ok(self.shared.read().await.get(&id).cloned())
    }
}
