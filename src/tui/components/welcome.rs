//! # Welcome Panel
//!
//! Shown in place of the message list while the transcript is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

/// Widest the panel gets before it stops growing with the terminal.
const MAX_WIDTH: u16 = 72;

pub struct WelcomePanel<'a> {
    pub assistant_name: &'a str,
    pub message: &'a str,
}

impl Component for WelcomePanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(MAX_WIDTH);
        let text = vec![
            Line::styled(
                self.assistant_name,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::from(self.message),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .padding(Padding::horizontal(2)),
            );

        // line_count adds the block rows but not its columns: borders (2) + padding (4)
        let height = (paragraph.line_count(width.saturating_sub(6)) as u16).min(area.height);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(paragraph, panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_WELCOME;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn welcome_text_appears_once() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut panel = WelcomePanel {
            assistant_name: "Spapperi Assistant",
            message: "Ask about our machines.",
        };

        terminal.draw(|f| panel.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert_eq!(text.matches("Ask about our machines.").count(), 1);
        assert!(text.contains("Spapperi Assistant"));
    }

    #[test]
    fn default_welcome_fits_small_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        let mut panel = WelcomePanel {
            assistant_name: "Spapperi Assistant",
            message: DEFAULT_WELCOME,
        };

        // Clipped, never panics
        terminal.draw(|f| panel.render(f, f.area())).unwrap();
    }
}
