//! # Effect Dispatch
//!
//! Bridges the pure reducer and the backend. Each function performs one
//! backend call and wraps the result in the `Action` that reports it, so
//! the caller only has to feed the action back into `update()`.
//!
//! The TUI runs these inside `tokio::spawn` and ships the action over a
//! channel; the one-shot CLI awaits them inline.

use std::sync::Arc;

use log::info;

use crate::api::Backend;
use crate::core::action::{Action, Effect, update};
use crate::core::state::App;

pub async fn query(backend: &dyn Backend, question: &str) -> Action {
    Action::QueryCompleted(backend.query(question).await)
}

pub async fn load_status(backend: &dyn Backend) -> Action {
    Action::HealthLoaded(backend.health().await)
}

pub async fn load_stats(backend: &dyn Backend) -> Action {
    Action::StatsLoaded(backend.stats().await)
}

/// Both startup fetches, run concurrently. Order of the returned actions is
/// fixed (health, stats) but they write disjoint state.
pub async fn load_startup(backend: Arc<dyn Backend>) -> [Action; 2] {
    let (health, stats) = futures::join!(load_status(&*backend), load_stats(&*backend));
    [health, stats]
}

/// Drive a full `submitQuestion` round trip without a terminal: submit,
/// await the backend, apply the result. Returns the final effect.
pub async fn submit_and_wait(app: &mut App, backend: &dyn Backend, text: String) -> Effect {
    match update(app, Action::Submit(text)) {
        Effect::SpawnQuery(question) => {
            info!("Awaiting answer inline");
            let action = query(backend, &question).await;
            update(app, action)
        }
        other => other,
    }
}
