//! # Actions
//!
//! Everything that can happen in ragchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::QueryCompleted(result)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing the I/O the
//! adapter should perform next. No side effects here beyond logging.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Conversation lifecycle:
//!
//! ```text
//!   idle ──Submit(text)──▶ sending ──QueryCompleted(..)──▶ idle
//!     ▲                      │
//!     └── Submit while sending is rejected (no queue, no cancel)
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, HealthResponse, QueryResponse, StatsResponse};
use crate::core::message::Message;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// User submitted the input box contents.
    Submit(String),
    /// The outstanding `/query` request resolved.
    QueryCompleted(Result<QueryResponse, ApiError>),
    /// Startup `/health` fetch resolved.
    HealthLoaded(Result<HealthResponse, ApiError>),
    /// Startup `/stats` fetch resolved.
    StatsLoaded(Result<StatsResponse, ApiError>),
    Quit,
}

/// Side effect requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Issue `POST /query` with this question. The user message is already
    /// in the transcript, so the view should also pin to the latest message.
    SpawnQuery(String),
    /// The transcript grew; pin the view to the latest message.
    ScrollToLatest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            if app.in_flight {
                debug!("Ignoring submission while a query is in flight");
                return Effect::None;
            }
            info!("Submitting question ({} bytes)", text.len());
            app.transcript.push(Message::user(text.clone()));
            app.in_flight = true;
            Effect::SpawnQuery(text)
        }
        Action::QueryCompleted(result) => {
            if !app.in_flight {
                warn!("Dropping query result with no request in flight");
                return Effect::None;
            }
            let reply = match result {
                Ok(response) => {
                    debug!("Query succeeded with {} sources", response.sources.len());
                    Message::from(response)
                }
                Err(e) => {
                    warn!("Query failed: {}", e);
                    Message::fallback()
                }
            };
            app.transcript.push(reply);
            app.in_flight = false;
            Effect::ScrollToLatest
        }
        Action::HealthLoaded(result) => {
            match result {
                Ok(health) => {
                    info!("Health: database_connected={}", health.database_connected);
                    app.status = Some(health.into());
                }
                Err(e) => warn!("Error fetching health: {}", e),
            }
            Effect::None
        }
        Action::StatsLoaded(result) => {
            match result {
                Ok(stats) => {
                    info!(
                        "Stats: {} documents from {} sources",
                        stats.total_documents, stats.unique_sources
                    );
                    app.stats = Some(stats.into());
                }
                Err(e) => warn!("Error fetching stats: {}", e),
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
