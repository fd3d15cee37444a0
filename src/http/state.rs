use crate::export::ExportService;
use crate::i18n::Messages;
use crate::meeting::InMemoryMeetings;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Meeting snapshots (host-data seam when running standalone)
    pub meetings: Arc<InMemoryMeetings>,

    /// Export job service
    pub exports: Arc<ExportService>,

    /// Label/placeholder catalog for user-visible strings
    pub messages: Arc<dyn Messages>,
}

impl AppState {
    pub fn new(
        meetings: Arc<InMemoryMeetings>,
        exports: Arc<ExportService>,
        messages: Arc<dyn Messages>,
    ) -> Self {
        Self {
            meetings,
            exports,
            messages,
        }
    }
}
