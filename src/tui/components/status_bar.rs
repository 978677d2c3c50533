//! # StatusBar Component
//!
//! One line under the header: backend connectivity, knowledge-base size, and
//! a "↓ New" marker when the user has scrolled away from fresh content.
//!
//! Stateless. Everything is read from `App` plus one flag from the TUI state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::component::Component;

pub struct StatusBar<'a> {
    pub app: &'a App,
    pub has_unseen_content: bool,
}

impl StatusBar<'_> {
    fn spans(&self) -> Vec<Span<'static>> {
        let connection_color = if self.app.is_connected() {
            Color::Green
        } else {
            Color::Red
        };
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));

        let mut spans = vec![
            Span::styled(self.app.connection_label(), Style::default().fg(connection_color)),
            separator.clone(),
            Span::raw(self.app.documents_label()),
            separator,
            Span::raw(self.app.sources_label()),
        ];
        if self.has_unseen_content {
            spans.push(Span::styled(
                "  ↓ New",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        spans
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(self.spans()).alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{Stats, Status};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, unseen: bool) -> (String, Color) {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        let mut bar = StatusBar {
            app,
            has_unseen_content: unseen,
        };
        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        let dot = buffer
            .content()
            .iter()
            .find(|c| c.symbol() == "●")
            .map(|c| c.fg)
            .unwrap();
        (text, dot)
    }

    #[test]
    fn never_loaded_shows_disconnected_and_zero() {
        let app = test_app();
        let (text, dot) = draw(&app, false);
        assert!(text.contains("● Disconnected"));
        assert!(text.contains("0 documents loaded"));
        assert!(text.contains("0 sources"));
        assert_eq!(dot, Color::Red);
    }

    #[test]
    fn loaded_shows_connected_in_green() {
        let mut app = test_app();
        app.status = Some(Status { database_connected: true });
        app.stats = Some(Stats {
            total_documents: 42,
            unique_sources: 7,
            sources: vec!["catalog.pdf".to_string()],
        });

        let (text, dot) = draw(&app, false);
        assert!(text.contains("● Connected"));
        assert!(text.contains("42 documents loaded"));
        assert!(text.contains("7 sources"));
        assert_eq!(dot, Color::Green);
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn unseen_marker() {
        let app = test_app();
        let (text, _) = draw(&app, true);
        assert!(text.contains("↓ New"));
    }
}
