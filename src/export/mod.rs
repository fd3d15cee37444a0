//! Meeting Markdown export
//!
//! This module provides the export pipeline:
//! - `ExportOptions` / `RawToggle` - checkbox parameter normalization
//! - `render_markdown` - the meeting-to-Markdown serializer
//! - `ExportRecord` / `ExportRecordStore` - per-attempt status records
//! - `ExportService` - the background job wrapper tying it all together

mod job;
mod markdown;
mod options;
mod record;

pub use job::ExportService;
pub use markdown::{clean_filename, render_markdown, MARKDOWN_CONTENT_TYPE};
pub use options::{normalize_checkbox, ExportOptions, RawToggle};
pub use record::{ExportRecord, ExportRecordStore, ExportStatus, ExportTable, InMemoryExportStore};
