//! # InputBox Component
//!
//! Single-line question entry with a send hint in the border.
//!
//! ## Responsibilities
//!
//! - Capture text input, including bracketed paste
//! - Handle editing (backspace, delete, word deletion, cursor movement)
//! - Handle submission (Enter) of non-blank text
//! - Show the placeholder when empty and a "Sending..." state while disabled
//!
//! ## State Management
//!
//! The buffer is internal state. `disabled` and `placeholder` are props
//! refreshed from the application state each frame. Cursor position and the
//! horizontal view are encapsulated in `CursorState`.

mod cursor;
mod editing;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use editing::{flatten, next_char_boundary, next_word_boundary, prev_char_boundary, prev_word_boundary};

pub use editing::INPUT_HEIGHT;

const TITLE_READY: &str = "Send (Enter)";
const TITLE_SENDING: &str = "Sending...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `placeholder`: hint shown while the buffer is empty
/// - `disabled`: true while a question is in flight; all edits are rejected
pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    pub placeholder: String,
    pub disabled: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            placeholder: placeholder.into(),
            disabled: false,
            cursor: CursorState::new(),
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_view(&self.buffer, area.width);

        let (title, border_style) = if self.disabled {
            (TITLE_SENDING, Style::default().fg(Color::DarkGray))
        } else {
            (TITLE_READY, Style::default().fg(Color::Cyan))
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .padding(Padding::horizontal(1));

        let input = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            let text_style = if self.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            Paragraph::new(self.cursor.visible(&self.buffer, area.width)).style(text_style)
        };

        frame.render_widget(input.block(block), area);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                if c.is_control() {
                    return None;
                }
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let text = flatten(text);
                if text.is_empty() {
                    return None;
                }
                self.insert_str(&text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::DeleteWord => {
                let start = prev_word_boundary(&self.buffer, self.cursor.pos);
                if start == self.cursor.pos {
                    return None;
                }
                self.buffer.drain(start..self.cursor.pos);
                self.cursor.pos = start;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::ClearLine => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.buffer.clear();
                self.cursor.reset();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                let pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorRight => {
                let pos = next_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::WordLeft => {
                let pos = prev_word_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::WordRight => {
                let pos = next_word_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorHome => self.move_to(0),
            TuiEvent::CursorEnd => {
                let end = self.buffer.len();
                self.move_to(end)
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new("Ask me anything");
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    fn render_text(input: &mut InputBox, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, INPUT_HEIGHT)).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = typed("ab");
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn submit_takes_buffer() {
        let mut input = typed("hello");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".to_string())));
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut input = typed("   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn disabled_input_rejects_edits() {
        let mut input = typed("next question");
        input.disabled = true;
        assert_eq!(input.handle_event(&TuiEvent::InputChar('!')), None);
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "next question");
    }

    #[test]
    fn paste_is_flattened_at_cursor() {
        let mut input = typed("ad");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Paste("b\nc".to_string()));
        assert_eq!(input.buffer, "ab cd");
    }

    #[test]
    fn word_editing() {
        let mut input = typed("what tractors");
        input.handle_event(&TuiEvent::DeleteWord);
        assert_eq!(input.buffer, "what ");

        input.handle_event(&TuiEvent::WordLeft);
        input.handle_event(&TuiEvent::InputChar('_'));
        assert_eq!(input.buffer, "_what ");

        input.handle_event(&TuiEvent::ClearLine);
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn home_end_move_cursor() {
        let mut input = typed("abc");
        assert_eq!(input.handle_event(&TuiEvent::CursorEnd), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorHome), Some(InputEvent::ContentChanged));
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");
    }

    #[test]
    fn multibyte_cursor_movement() {
        let mut input = typed("é中");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "中");
    }

    #[test]
    fn empty_input_shows_placeholder_and_send_hint() {
        let mut input = InputBox::new("Ask me anything");
        let text = render_text(&mut input, 40);
        assert!(text.contains("Send (Enter)"));
        assert!(text.contains("Ask me anything"));
    }

    #[test]
    fn disabled_input_shows_sending() {
        let mut input = typed("draft");
        input.disabled = true;
        let text = render_text(&mut input, 40);
        assert!(text.contains("Sending..."));
        assert!(!text.contains("Send (Enter)"));
        assert!(text.contains("draft"));
    }
}
