use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fully loaded meeting snapshot
///
/// Agenda items (with their outcomes) and participants are loaded together
/// with the meeting, so a render pass never observes a partial view under
/// concurrent edits. The exporter only reads this structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique meeting identifier
    pub id: Uuid,

    /// Meeting title, also used to derive the export filename
    pub title: String,

    /// Display name of the owning project
    pub project_name: String,

    /// Start of the meeting, with the viewer's offset already applied
    pub start_time: DateTime<FixedOffset>,

    /// Planned duration in minutes
    pub duration_minutes: u32,

    /// Optional location; an unset or empty location is not rendered
    #[serde(default)]
    pub location: Option<String>,

    /// Agenda items, display-ordered by ascending `position`
    #[serde(default)]
    pub agenda_items: Vec<AgendaItem>,

    /// Invited participants
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// A titled sub-topic of a meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaItem {
    /// Stored position; defines display order but not the rendered index
    pub position: i32,

    /// Freeform title
    pub title: String,

    /// Computed title for items that represent something other than
    /// freeform text (e.g. a linked work item); preferred over `title`
    /// when present
    #[serde(default)]
    pub display_title: Option<String>,

    /// Optional notes text
    #[serde(default)]
    pub notes: Option<String>,

    /// Recorded outcomes, in stored order
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl AgendaItem {
    /// Title to render for this item
    pub fn display_title(&self) -> &str {
        self.display_title.as_deref().unwrap_or(&self.title)
    }
}

/// A recorded result of discussing an agenda item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Free-text note; an empty note renders nothing
    Note { notes: String },

    /// Reference to an external work item
    WorkItem { link: WorkItemLink },
}

/// Resolution state of a referenced work item, as seen by the viewer
///
/// The host resolves visibility before handing the snapshot over, so the
/// renderer can match exhaustively instead of probing capabilities.
/// `Unresolved` keeps the raw-identifier fallback explicit rather than
/// assuming it is unreachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkItemLink {
    /// Visible to the viewer; `display` is the item's display string
    Visible { id: u64, display: String },

    /// The link exists but the viewer may not see the item
    Undisclosed { id: u64 },

    /// The linked item has been deleted
    Deleted,

    /// None of the above states could be determined
    Unresolved { id: u64 },
}

/// A meeting participant; only the display name is consumed here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user_name: String,
}
