use super::options::ExportOptions;
use crate::i18n::Messages;
use crate::meeting::{AgendaItem, Meeting, Outcome, WorkItemLink};

/// Content type of the produced document
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// UTF-8 byte-order marker, emitted first to help content type detection
const UTF8_BOM: &str = "\u{feff}";

/// Serialize a meeting snapshot into a Markdown document
///
/// Pure and deterministic: the same snapshot and flags always produce
/// byte-identical output. Missing data (no location, no participants, no
/// agenda) degrades to a shorter document with those sections omitted.
pub fn render_markdown(meeting: &Meeting, options: &ExportOptions, messages: &dyn Messages) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(UTF8_BOM.to_string());

    // Meeting title
    lines.push(format!("# {}", meeting.title));
    lines.push(String::new());

    // Meeting details
    lines.push(format!("**{}:** {}", messages.project_label(), meeting.project_name));
    lines.push(format!(
        "**{}:** {}",
        messages.date_label(),
        meeting.start_time.format("%Y-%m-%d")
    ));
    lines.push(format!(
        "**{}:** {}",
        messages.time_label(),
        meeting.start_time.format("%H:%M")
    ));
    if let Some(location) = meeting.location.as_deref().filter(|l| !l.trim().is_empty()) {
        lines.push(format!("**{}:** {}", messages.location_label(), location));
    }
    lines.push(String::new());

    // Participants section, only when enabled and non-empty
    if options.include_participants && !meeting.participants.is_empty() {
        lines.push(format!("## {}", messages.participants_heading()));
        for participant in &meeting.participants {
            lines.push(format!("- {}", participant.user_name));
        }
        lines.push(String::new());
    }

    // Agenda section
    if !meeting.agenda_items.is_empty() {
        lines.push(format!("## {}", messages.agenda_heading()));

        let mut items: Vec<&AgendaItem> = meeting.agenda_items.iter().collect();
        items.sort_by_key(|item| item.position);

        // The rendered index is the contiguous render order, not the
        // stored position value.
        for (index, item) in items.iter().enumerate() {
            lines.push(format!("### {}. {}", index + 1, item.display_title()));

            if let Some(notes) = item.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                lines.push(String::new());
                lines.push(format!("**{}:**", messages.notes_label()));
                lines.push(notes.to_string());
            }

            if options.include_outcomes && !item.outcomes.is_empty() {
                lines.push(String::new());
                lines.push(format!("**{}:**", messages.outcomes_label()));
                for outcome in &item.outcomes {
                    if let Some(line) = outcome_line(outcome, messages) {
                        lines.push(line);
                    }
                }
            }

            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Render one outcome as a bullet, or nothing for a blank note
fn outcome_line(outcome: &Outcome, messages: &dyn Messages) -> Option<String> {
    match outcome {
        Outcome::Note { notes } => {
            if notes.trim().is_empty() {
                None
            } else {
                Some(format!("- {}", notes))
            }
        }
        Outcome::WorkItem { link } => Some(format!(
            "- **{}:** {}",
            messages.task_label(),
            work_item_title(link, messages)
        )),
    }
}

fn work_item_title(link: &WorkItemLink, messages: &dyn Messages) -> String {
    match link {
        WorkItemLink::Visible { display, .. } => display.clone(),
        WorkItemLink::Undisclosed { id } => messages.undisclosed_work_item(*id),
        WorkItemLink::Deleted => messages.deleted_work_item(),
        WorkItemLink::Unresolved { id } => id.to_string(),
    }
}

/// Derive a flat attachment filename from a meeting title
///
/// Path separators and control characters are replaced so the title can
/// never escape the attachment directory.
pub fn clean_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        "meeting.md".to_string()
    } else {
        format!("{}.md", cleaned)
    }
}
