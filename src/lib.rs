pub mod attachment;
pub mod config;
pub mod export;
pub mod http;
pub mod i18n;
pub mod meeting;

pub use attachment::{Attachment, AttachmentStore, FsAttachmentStore};
pub use config::Config;
pub use export::{
    normalize_checkbox, render_markdown, ExportOptions, ExportRecord, ExportRecordStore,
    ExportService, ExportStatus, ExportTable, InMemoryExportStore, RawToggle,
};
pub use http::{create_router, AppState};
pub use i18n::{DefaultMessages, Messages};
pub use meeting::{
    AgendaItem, InMemoryMeetings, Meeting, MeetingRepository, Outcome, Participant, WorkItemLink,
};
