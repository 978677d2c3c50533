use chrono::{DateTime, Local};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Role};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Blank rows left under each bubble.
pub const MESSAGE_SPACING: u16 = 1;

/// Label shown on user bubbles.
pub const USER_LABEL: &str = "You";

fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Cyan,
        Role::Assistant => Color::Green,
    }
}

/// Build the body of a message: rendered markdown, then the citation block.
///
/// The transcript is append-only and messages are immutable, so callers can
/// build this once per message and keep it.
pub fn message_body(message: &Message) -> Text<'static> {
    let mut body = markdown::render(&message.content, role_color(message.role));
    if body.lines.is_empty() {
        body.lines.push(Line::default());
    }

    if message.has_sources() {
        let muted = Style::default().fg(Color::DarkGray);
        body.lines.push(Line::default());
        body.lines.push(Line::from(Span::styled(
            "Sources:",
            muted.add_modifier(Modifier::BOLD),
        )));
        for source in &message.sources {
            body.lines.push(Line::from(vec![
                Span::styled("▪ ", muted),
                Span::styled(markdown::sanitize(&source.citation()), muted),
            ]));
        }
    }
    body
}

/// Rendered rows needed for `body` at total width `width`, spacing included.
pub fn body_height(body: &Text<'static>, width: u16) -> usize {
    let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
    if content_width == 0 {
        // Degenerate case: terminal too narrow for borders + padding.
        return 1;
    }
    let lines = Paragraph::new(body.clone())
        .wrap(Wrap { trim: false })
        .line_count(content_width);
    lines.max(1) + usize::from(VERTICAL_OVERHEAD + MESSAGE_SPACING)
}

/// Widget for one transcript message, drawn as a bordered bubble.
///
/// The role label and timestamp sit in the top border: left-aligned for the
/// assistant, right-aligned for the user.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub role: Role,
    pub label: &'a str,
    pub timestamp: DateTime<Local>,
    pub body: &'a Text<'static>,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &Message, assistant_name: &'a str, body: &'a Text<'static>) -> Self {
        let label = match message.role {
            Role::User => USER_LABEL,
            Role::Assistant => assistant_name,
        };
        Self {
            role: message.role,
            label,
            timestamp: message.timestamp,
            body,
        }
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let color = role_color(self.role);
        let border_style = Style::default().fg(color).add_modifier(Modifier::DIM);
        let title = format!(" {} · {} ", self.label, self.timestamp.format("%H:%M"));
        let alignment = match self.role {
            Role::User => Alignment::Right,
            Role::Assistant => Alignment::Left,
        };

        let bubble = Rect {
            height: area.height.saturating_sub(MESSAGE_SPACING),
            ..area
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(Span::styled(title, Style::default().fg(color))).alignment(alignment))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(bubble);
        block.render(bubble, buf);
        Paragraph::new(self.body.clone())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Transient "assistant is typing" bubble shown while a query is in flight.
/// Never part of the transcript.
#[derive(Clone, Copy)]
pub struct TypingIndicator<'a> {
    pub label: &'a str,
    pub frame_index: usize,
}

impl TypingIndicator<'_> {
    pub const HEIGHT: u16 = 1 + VERTICAL_OVERHEAD + MESSAGE_SPACING;

    /// Three dots with one lit, cycling.
    pub fn dots(frame_index: usize) -> String {
        let lit = frame_index % 3;
        (0..3)
            .map(|i| if i == lit { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let color = role_color(Role::Assistant);
        let bubble = Rect {
            height: area.height.saturating_sub(MESSAGE_SPACING),
            ..area
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color).add_modifier(Modifier::DIM))
            .title(Span::styled(format!(" {} ", self.label), Style::default().fg(color)))
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);
        Paragraph::new(Self::dots(self.frame_index))
            .style(Style::default().fg(color))
            .render(inner, buf);
    }
}
