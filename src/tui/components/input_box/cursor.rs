//! Cursor position and horizontal view tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the byte offset where the
//! visible window starts. Methods take `buffer: &str` explicitly since the
//! text is owned by `InputBox`.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::editing::{CONTENT_OFFSET, inner_width, next_char_boundary};

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible byte when the text is wider than the box
    pub view_start: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, view_start: 0 }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.view_start = 0;
    }

    /// Slide the visible window so the cursor cell stays inside it.
    pub fn update_view(&mut self, buffer: &str, area_width: u16) {
        let width = inner_width(area_width) as usize;
        if self.view_start > self.pos {
            self.view_start = self.pos;
        }
        if width == 0 {
            return;
        }
        // One cell is reserved for the cursor itself
        while self.view_start < self.pos && buffer[self.view_start..self.pos].width() >= width {
            self.view_start = next_char_boundary(buffer, self.view_start);
        }
    }

    /// The slice of `buffer` that fits in the box starting at `view_start`.
    pub fn visible<'b>(&self, buffer: &'b str, area_width: u16) -> &'b str {
        let width = inner_width(area_width) as usize;
        let tail = &buffer[self.view_start..];
        let mut used = 0;
        let end = tail
            .char_indices()
            .find(|&(_, c)| {
                used += c.width().unwrap_or(0);
                used > width
            })
            .map(|(i, _)| i)
            .unwrap_or(tail.len());
        &tail[..end]
    }

    /// Screen position of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let col = buffer[self.view_start..self.pos].width() as u16;
        let max_col = inner_width(area.width).saturating_sub(1);
        (
            area.x + CONTENT_OFFSET + col.min(max_col),
            area.y + 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_needs_no_scroll() {
        let mut cursor = CursorState::new();
        cursor.pos = 5;
        cursor.update_view("hello", 20);
        assert_eq!(cursor.view_start, 0);
        assert_eq!(cursor.visible("hello", 20), "hello");
    }

    #[test]
    fn long_text_scrolls_to_keep_cursor_visible() {
        let buffer = "abcdefghijklmnop";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        // inner width 10: nine chars plus the cursor cell
        cursor.update_view(buffer, 14);
        assert_eq!(cursor.view_start, 7);
        assert_eq!(cursor.visible(buffer, 14), "hijklmnop");
        assert_eq!(cursor.screen_pos(buffer, Rect::new(0, 0, 14, 3)), (11, 1));
    }

    #[test]
    fn moving_left_past_view_pulls_window_back() {
        let buffer = "abcdefghijklmnop";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_view(buffer, 14);
        cursor.pos = 2;
        cursor.update_view(buffer, 14);
        assert_eq!(cursor.view_start, 2);
    }

    #[test]
    fn wide_chars_count_two_cells() {
        let buffer = "中文中文中文";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        // inner width 6: two wide chars plus room for the cursor
        cursor.update_view(buffer, 10);
        assert_eq!(&buffer[cursor.view_start..], "中文");
    }
}
