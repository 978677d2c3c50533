//! Plain-text output for the one-shot `ask` and `status` commands.
//!
//! Both go through the same reducer as the interactive view; only the final
//! state is printed.

use std::sync::Arc;

use crate::api::Backend;
use crate::core::action::update;
use crate::core::message::Message;
use crate::core::state::App;
use crate::dispatch;
use crate::tui::markdown::sanitize;

/// Ask one question and return the reply as printable text.
pub async fn ask(app: &mut App, backend: &dyn Backend, question: String) -> Option<String> {
    dispatch::submit_and_wait(app, backend, question).await;
    app.transcript.last().map(format_reply)
}

/// Load health and stats, then render the status line.
pub async fn status(app: &mut App, backend: Arc<dyn Backend>) -> String {
    for action in dispatch::load_startup(backend).await {
        update(app, action);
    }
    format_status(app)
}

/// Message content followed by its citation block. Control characters are
/// stripped so backend text cannot drive the terminal.
pub fn format_reply(message: &Message) -> String {
    let mut out = sanitize(&message.content);
    if message.has_sources() {
        out.push_str("\n\nSources:");
        for source in &message.sources {
            out.push_str("\n▪ ");
            out.push_str(&sanitize(&source.citation()));
        }
    }
    out
}

pub fn format_status(app: &App) -> String {
    let mut out = app.status_summary();
    if let Some(stats) = &app.stats {
        for name in &stats.sources {
            out.push_str("\n  ▪ ");
            out.push_str(&sanitize(name));
        }
    }
    out
}
