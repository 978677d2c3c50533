//! # Header Component
//!
//! Two centered lines at the top of the screen: the title and the subtitle.
//! Stateless; both strings are props taken from the UI configuration.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct Header<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
}

impl Header<'_> {
    pub const HEIGHT: u16 = 2;
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::styled(
                self.title,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::styled(self.subtitle, Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
