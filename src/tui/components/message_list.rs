//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display the transcript as bubbles, oldest first
//! - Show the transient typing indicator after the last message while a
//!   query is in flight
//! - Stick to the bottom until the user scrolls away, re-pin on request
//! - Cache rendered bodies and heights
//!
//! ## Layout caching
//!
//! The transcript is append-only and messages never change once appended,
//! so a message's rendered body is computed exactly once and kept by index.
//! Heights depend only on body and width: they are extended as messages
//! arrive and thrown away when the width changes.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Text;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::{Message, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{MessageBubble, TypingIndicator, body_height, message_body};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
///
/// Rows are counted in `usize` across the whole transcript. Only the slice
/// around the viewport is drawn, into a `ScrollView` canvas of its own.
pub struct MessageListState {
    /// First transcript row shown at the top of the viewport
    pub offset: usize,
    /// Cached bodies and measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Last known canvas height, typing indicator included
    pub canvas_height: usize,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            canvas_height: 0,
        }
    }

    fn max_offset(&self) -> usize {
        self.canvas_height
            .saturating_sub(usize::from(self.viewport_height))
    }

    /// Pin the view to the latest message. Called after every transcript
    /// mutation.
    pub fn scroll_to_latest(&mut self) {
        self.stick_to_bottom = true;
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        if self.offset >= max_y {
            self.stick_to_bottom = true;
            self.offset = max_y;
        }
    }

    /// True when the user has scrolled up and there is content below.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.offset < self.max_offset()
    }

    fn page(&self) -> usize {
        usize::from(self.viewport_height.max(1))
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub assistant_name: &'a str,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        assistant_name: &'a str,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            assistant_name,
            is_loading,
            spinner_frame,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let messages = self.transcript.as_slice();

        // 1. Bring the cache up to date
        self.state.layout.sync(messages, content_width);

        let total_height = self.state.layout.total_height();
        let typing_height = if self.is_loading {
            usize::from(TypingIndicator::HEIGHT)
        } else {
            0
        };
        let canvas_height = total_height.saturating_add(typing_height);

        // 2. Pin or clamp before picking what is visible
        self.state.viewport_height = area.height;
        self.state.canvas_height = canvas_height;
        if self.state.stick_to_bottom {
            self.state.offset = self.state.max_offset();
        } else {
            self.state.clamp_scroll();
        }

        let offset = self.state.offset;
        let layout = &self.state.layout;
        let visible = layout.visible_range(offset, area.height);
        let show_typing = self.is_loading && visible.end == layout.heights.len();

        // 3. Draw only the visible slice; rows are local to its first bubble
        let window_top = layout.top_of(visible.start);
        let window_bottom = layout.top_of(visible.end) + if show_typing { typing_height } else { 0 };
        let local = |row: usize| u16::try_from(row - window_top).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(content_width, local(window_bottom)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible {
            let y = local(layout.top_of(i));
            // A bubble taller than the canvas limit is clipped at its end
            let height = u16::try_from(layout.heights[i])
                .unwrap_or(u16::MAX)
                .min(u16::MAX - y);
            if height == 0 {
                break;
            }
            let bubble = MessageBubble::new(&messages[i], self.assistant_name, &layout.bodies[i]);
            scroll_view.render_widget(bubble, Rect::new(0, y, content_width, height));
        }

        // 4. Typing indicator sits after the last real message, outside the transcript
        if show_typing {
            let indicator = TypingIndicator {
                label: self.assistant_name,
                frame_index: self.spinner_frame,
            };
            scroll_view.render_widget(
                indicator,
                Rect::new(0, local(total_height), content_width, TypingIndicator::HEIGHT),
            );
        }

        let mut window_state = ScrollViewState::default();
        window_state.set_offset(Position::new(0, local(offset)));
        frame.render_stateful_widget(
            scroll_view,
            Rect { width: content_width, ..area },
            &mut window_state,
        );

        if canvas_height > usize::from(area.height) {
            let mut scrollbar_state = ScrollbarState::new(self.state.max_offset())
                .position(offset)
                .viewport_content_length(usize::from(area.height));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut scrollbar_state,
            );
        }
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is rebuilt
/// every frame and cannot hold scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.offset = self.offset.saturating_sub(1);
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.offset = self.offset.saturating_add(1);
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.offset = self.offset.saturating_sub(self.page());
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.offset = self.offset.saturating_add(self.page());
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => self.scroll_to_latest(),
            _ => {}
        }
        None
    }
}

/// Rendered bodies plus their heights at the current width.
pub struct LayoutCache {
    pub bodies: Vec<Text<'static>>,
    pub heights: Vec<usize>,
    pub prefix_heights: Vec<usize>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// Extend the cache with messages appended since the last call.
    pub fn sync(&mut self, messages: &[Message], content_width: u16) {
        // A shorter transcript means a different transcript altogether
        if messages.len() < self.bodies.len() {
            self.bodies.clear();
            self.heights.clear();
        }
        if content_width != self.content_width {
            self.heights.clear();
            self.content_width = content_width;
        }

        let known = self.bodies.len();
        self.bodies.extend(messages[known..].iter().map(message_body));

        let measured = self.heights.len();
        self.heights.extend(
            self.bodies[measured..]
                .iter()
                .map(|body| body_height(body, content_width)),
        );
        if self.prefix_heights.len() != self.heights.len() || measured == 0 {
            self.rebuild_prefix_heights();
        }
    }

    pub fn total_height(&self) -> usize {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// First row of message `index`; `index == len` gives the total height.
    pub fn top_of(&self, index: usize) -> usize {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or_else(|| self.total_height()),
        }
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0usize, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    /// Indices of messages overlapping the viewport, with half a viewport of
    /// slack either side.
    pub fn visible_range(&self, scroll_offset: usize, viewport_height: u16) -> std::ops::Range<usize> {
        let viewport_height = usize::from(viewport_height);
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
