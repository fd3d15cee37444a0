use super::model::Meeting;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Seam to the host's meeting persistence layer
///
/// Implementations must return a fully loaded snapshot: agenda items with
/// their outcomes, and participants, all in one read.
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Find a meeting visible to the current viewer, or `None`
    async fn find_visible(&self, id: Uuid) -> Result<Option<Meeting>>;
}

/// In-memory meeting store for standalone operation and tests
#[derive(Default)]
pub struct InMemoryMeetings {
    meetings: RwLock<HashMap<Uuid, Meeting>>,
}

impl InMemoryMeetings {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, meeting: Meeting) {
        let mut meetings = self.meetings.write().await;
        meetings.insert(meeting.id, meeting);
    }

    pub async fn remove(&self, id: Uuid) -> Option<Meeting> {
        let mut meetings = self.meetings.write().await;
        meetings.remove(&id)
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetings {
    async fn find_visible(&self, id: Uuid) -> Result<Option<Meeting>> {
        let meetings = self.meetings.read().await;
        Ok(meetings.get(&id).cloned())
    }
}
