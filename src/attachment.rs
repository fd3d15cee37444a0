//! Durable attachment storage
//!
//! The host application owns attachment storage; this module defines the
//! seam the export job writes through, plus a filesystem implementation
//! used when running standalone. One create call per export, treated as
//! atomic: it either yields a downloadable attachment or an error.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// A stored attachment and where to download it from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    /// Download reference recorded on the export record
    pub download_path: String,
}

#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store one file and return its download reference
    async fn create(&self, filename: &str, content_type: &str, content: &[u8]) -> Result<Attachment>;
}

/// Filesystem-backed attachment store
///
/// Files land under `root/<attachment id>/<filename>`; the id directory
/// keeps identically titled exports from clobbering each other.
pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn create(&self, filename: &str, content_type: &str, content: &[u8]) -> Result<Attachment> {
        let id = Uuid::new_v4();
        let dir = self.root.join(id.to_string());

        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create attachment directory {}", dir.display()))?;

        let path = dir.join(filename);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write attachment {}", path.display()))?;

        info!("Stored attachment {} ({} bytes)", path.display(), content.len());

        Ok(Attachment {
            id,
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            download_path: format!("/attachments/{}/{}", id, filename),
        })
    }
}
