//! Meeting domain model
//!
//! This module provides the read-only meeting snapshot consumed by the
//! Markdown exporter:
//! - `Meeting` with its agenda items, outcomes, and participants
//! - `Outcome` / `WorkItemLink` as closed tagged variants so the render
//!   rules stay exhaustiveness-checked
//! - `MeetingRepository` as the seam to the host's persistence layer,
//!   with an in-memory implementation for standalone use and tests

mod model;
mod store;

pub use model::{AgendaItem, Meeting, Outcome, Participant, WorkItemLink};
pub use store::{InMemoryMeetings, MeetingRepository};
