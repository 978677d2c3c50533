//! # Application State
//!
//! Core business state for ragchat. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transcript: Transcript     // append-only conversation
//! ├── status: Option<Status>     // last /health result (None = never loaded)
//! ├── stats: Option<Stats>       // last /stats result (None = never loaded)
//! ├── in_flight: bool            // a /query request is outstanding
//! └── ui: UiCopy                 // product copy (title, labels, placeholder)
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::UiCopy;
use crate::core::message::{Stats, Status, Transcript};

pub struct App {
    pub transcript: Transcript,
    pub status: Option<Status>,
    pub stats: Option<Stats>,
    pub in_flight: bool,
    pub ui: UiCopy,
}

impl App {
    pub fn new(ui: UiCopy) -> Self {
        Self {
            transcript: Transcript::new(),
            status: None,
            stats: None,
            in_flight: false,
            ui,
        }
    }

    /// Unset status renders as disconnected.
    pub fn is_connected(&self) -> bool {
        self.status.is_some_and(|s| s.database_connected)
    }

    /// Unset stats render as zero.
    pub fn document_count(&self) -> u64 {
        self.stats.as_ref().map_or(0, |s| s.total_documents)
    }

    pub fn source_count(&self) -> u64 {
        self.stats.as_ref().map_or(0, |s| s.unique_sources)
    }

    pub fn connection_label(&self) -> &'static str {
        if self.is_connected() {
            "● Connected"
        } else {
            "● Disconnected"
        }
    }

    pub fn documents_label(&self) -> String {
        format!("{} documents loaded", self.document_count())
    }

    pub fn sources_label(&self) -> String {
        format!("{} sources", self.source_count())
    }

    /// The status bar as one plain line.
    pub fn status_summary(&self) -> String {
        format!(
            "{} | {} | {}",
            self.connection_label(),
            self.documents_label(),
            self.sources_label()
        )
    }
}
