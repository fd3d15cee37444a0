//! Pluggable message lookup for rendered labels
//!
//! Headings and labels in the exported document go through this trait so a
//! host with a real translation catalog can localize them. Translation
//! itself is not implemented here; `DefaultMessages` supplies English.

/// Localized labels and placeholders used by the Markdown renderer and the
/// export job status reporting.
pub trait Messages: Send + Sync {
    fn project_label(&self) -> String {
        "Project".to_string()
    }

    fn date_label(&self) -> String {
        "Date".to_string()
    }

    fn time_label(&self) -> String {
        "Time".to_string()
    }

    fn location_label(&self) -> String {
        "Location".to_string()
    }

    fn participants_heading(&self) -> String {
        "Participants".to_string()
    }

    fn agenda_heading(&self) -> String {
        "Agenda".to_string()
    }

    fn notes_label(&self) -> String {
        "Notes".to_string()
    }

    fn outcomes_label(&self) -> String {
        "Outcomes".to_string()
    }

    fn task_label(&self) -> String {
        "Task".to_string()
    }

    /// Placeholder for a work item the viewer may not see
    fn undisclosed_work_item(&self, id: u64) -> String {
        format!("Undisclosed work item #{}", id)
    }

    /// Placeholder for a work item that has been deleted
    fn deleted_work_item(&self) -> String {
        "(deleted work item)".to_string()
    }

    /// Checkbox label in the export options dialog
    fn include_participants_label(&self) -> String {
        "Include participants".to_string()
    }

    /// Checkbox label in the export options dialog
    fn include_outcomes_label(&self) -> String {
        "Include outcomes".to_string()
    }

    fn export_succeeded(&self) -> String {
        "The export has completed successfully.".to_string()
    }

    fn export_failed(&self, message: &str) -> String {
        format!("The export has failed: {}", message)
    }
}

/// English defaults, used when the host supplies no catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl Messages for DefaultMessages {}
