//! # Core Application Logic
//!
//! This module contains ragchat's business logic.
//! It knows nothing about any specific UI technology or transport.
//!
//! ```text
//!   keys / backend results ──▶ Action ──▶ update(&mut App) ──▶ Effect
//!                                                               │
//!        tui::run (event loop) or cli (one-shot) performs it ◀──┘
//! ```
//!
//! Apart from reading the config file, nothing here does I/O: requests are
//! described by `Effect` values and carried out by the caller, with results
//! coming back as new actions.
//!
//! ## Modules
//!
//! - [`state`]: `App`, everything the view renders
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: Transcript, message, citation, status and stats types
//! - [`config`]: Layered configuration (file → env → CLI)

pub mod action;
pub mod config;
pub mod message;
pub mod state;
