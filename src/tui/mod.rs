//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Backend calls run in `tokio::spawn` tasks. Each task sends exactly one
//! `Action` back over an `mpsc` channel, which the event loop drains between
//! frames and feeds to `update()`. The loop itself never awaits.
//!
//! ## Redraw Strategy
//!
//! Frames are only drawn when something changed: input, resize, or a
//! background result. While a question is in flight the loop polls every
//! 80ms and redraws unconditionally so the typing dots move; otherwise it
//! blocks up to 500ms waiting for input.
//!
//! The cursor is a steady block: `set_cursor_position` on every draw restarts
//! the terminal's blink timer, so a blinking cursor would flicker while the
//! dots animate.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::Backend;
use crate::core::action::{Action, Effect, update};
use crate::core::config::{ResolvedConfig, UiCopy};
use crate::core::state::App;
use crate::dispatch;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new(ui: &UiCopy) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(ui.placeholder.clone()),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Terminals without the kitty protocol ignore the flags push
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes on: mouse wheel, bracketed paste, keyboard enhancement");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig, backend: Arc<dyn Backend>) -> std::io::Result<()> {
    let mut app = App::new(config.ui);
    let mut tui = TuiState::new(&app.ui);

    let mut terminal = ratatui::init();
    let terminal_mode = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes, continuing without them: {}", e);
            None
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Status bar loads are independent: whichever lands first is shown first
    spawn_status_loads(&backend, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        tui.input_box.disabled = app.in_flight;

        let animating = app.in_flight;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 400) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Apply every queued event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = match event {
                // Redraw already flagged
                TuiEvent::Resize => continue,
                TuiEvent::Quit => update(&mut app, Action::Quit),
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                    continue;
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::Submit(text)) => update(&mut app, Action::Submit(text)),
                    Some(InputEvent::ContentChanged) | None => continue,
                },
            };
            if apply_effect(effect, &mut tui, &backend, &tx) {
                break 'event_loop;
            }
            // Keep the input's disabled prop current for the rest of this batch
            tui.input_box.disabled = app.in_flight;
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &mut tui, &backend, &tx) {
                break 'event_loop;
            }
        }
    }

    info!("Shutting down ({} messages in transcript)", app.transcript.len());
    drop(terminal_mode);
    ratatui::restore();
    Ok(())
}

/// Carry out an effect. Returns `true` when the loop should exit.
fn apply_effect(
    effect: Effect,
    tui: &mut TuiState,
    backend: &Arc<dyn Backend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::ScrollToLatest => {
            tui.message_list.scroll_to_latest();
            false
        }
        Effect::SpawnQuery(question) => {
            tui.message_list.scroll_to_latest();
            spawn_query(backend.clone(), question, tx.clone());
            false
        }
    }
}

fn spawn_query(backend: Arc<dyn Backend>, question: String, tx: mpsc::Sender<Action>) {
    info!("Spawning query request ({} chars)", question.len());
    tokio::spawn(async move {
        let started = Instant::now();
        let action = dispatch::query(&*backend, &question).await;
        debug!("Query finished in {:?}", started.elapsed());
        if tx.send(action).is_err() {
            warn!("Failed to send query result: receiver dropped");
        }
    });
}

fn spawn_status_loads(backend: &Arc<dyn Backend>, tx: &mpsc::Sender<Action>) {
    let (health_backend, health_tx) = (backend.clone(), tx.clone());
    tokio::spawn(async move {
        if health_tx
            .send(dispatch::load_status(&*health_backend).await)
            .is_err()
        {
            warn!("Failed to send health result: receiver dropped");
        }
    });

    let (stats_backend, stats_tx) = (backend.clone(), tx.clone());
    tokio::spawn(async move {
        if stats_tx
            .send(dispatch::load_stats(&*stats_backend).await)
            .is_err()
        {
            warn!("Failed to send stats result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QueryResponse;
    use crate::test_support::StubBackend;

    fn scrolled_away() -> TuiState {
        let mut tui = TuiState::new(&UiCopy::default());
        tui.message_list.handle_event(&TuiEvent::ScrollUp);
        assert!(!tui.message_list.stick_to_bottom);
        tui
    }

    fn stub() -> Arc<dyn Backend> {
        Arc::new(StubBackend::answering(QueryResponse {
            answer: "We sell X and Y.".to_string(),
            sources: vec![],
        }))
    }

    #[test]
    fn scroll_to_latest_effect_repins() {
        let mut tui = scrolled_away();
        let (tx, _rx) = mpsc::channel();

        let quit = apply_effect(Effect::ScrollToLatest, &mut tui, &stub(), &tx);

        assert!(!quit);
        assert!(tui.message_list.stick_to_bottom);
    }

    #[test]
    fn quit_effect_stops_the_loop() {
        let mut tui = TuiState::new(&UiCopy::default());
        let (tx, _rx) = mpsc::channel();
        assert!(apply_effect(Effect::Quit, &mut tui, &stub(), &tx));
        assert!(!apply_effect(Effect::None, &mut tui, &stub(), &tx));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn spawn_query_repins_and_reports_back() {
        let mut tui = scrolled_away();
        let (tx, rx) = mpsc::channel();

        let quit = apply_effect(
            Effect::SpawnQuery("What tractors do you sell?".to_string()),
            &mut tui,
            &stub(),
            &tx,
        );

        assert!(!quit);
        assert!(tui.message_list.stick_to_bottom);
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(Action::QueryCompleted(Ok(response))) => {
                assert_eq!(response.answer, "We sell X and Y.");
            }
            other => panic!("Expected a completed query, got {:?}", other),
        }
    }
}
