//! # Conversation Data
//!
//! Domain types for the transcript and the status bar. These are the
//! client's own shapes; the wire shapes live in `api::types` and are
//! converted at the boundary.
//!
//! ```text
//! Transcript
//! └── Message { role, content, sources, timestamp }
//!     └── Source { label, relevance_score }
//!
//! Status { database_connected }
//! Stats  { total_documents, unique_sources, sources }
//! ```

use chrono::{DateTime, Local};

use crate::api::{HealthResponse, QueryResponse, SourceRef, StatsResponse};

/// Assistant reply used for every failed query. No error detail is shown.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A backend-reported document supporting an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub label: String,
    /// In `[0, 1]` as reported by the backend.
    pub relevance_score: f64,
}

impl Source {
    /// `catalog.pdf (relevance: 91%)`
    pub fn citation(&self) -> String {
        format!(
            "{} (relevance: {})",
            self.label,
            format_relevance(self.relevance_score)
        )
    }
}

impl From<SourceRef> for Source {
    fn from(r: SourceRef) -> Self {
        Self {
            label: r.source,
            relevance_score: r.relevance_score,
        }
    }
}

/// Relevance as a whole percentage: `round(score * 100)` followed by `%`.
pub fn format_relevance(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Empty for user messages and failed queries.
    pub sources: Vec<Source>,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(content: String) -> Self {
        Self {
            role: Role::User,
            content,
            sources: Vec::new(),
            timestamp: Local::now(),
        }
    }

    pub fn assistant(content: String, sources: Vec<Source>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            sources,
            timestamp: Local::now(),
        }
    }

    /// The apology appended when a query fails for any reason.
    pub fn fallback() -> Self {
        Self::assistant(FALLBACK_REPLY.to_string(), Vec::new())
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

impl From<QueryResponse> for Message {
    fn from(resp: QueryResponse) -> Self {
        Message::assistant(
            resp.answer,
            resp.sources.into_iter().map(Source::from).collect(),
        )
    }
}

/// Append-only, insertion-ordered list of messages.
///
/// Only `push` mutates it; appended messages are reachable only through
/// shared references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Backend connectivity as last reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub database_connected: bool,
}

impl From<HealthResponse> for Status {
    fn from(h: HealthResponse) -> Self {
        Self {
            database_connected: h.database_connected,
        }
    }
}

/// Knowledge-base size as last reported by `/stats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_documents: u64,
    pub unique_sources: u64,
    pub sources: Vec<String>,
}

impl From<StatsResponse> for Stats {
    fn from(s: StatsResponse) -> Self {
        Self {
            total_documents: s.total_documents,
            unique_sources: s.unique_sources,
            sources: s.sources,
        }
    }
}
