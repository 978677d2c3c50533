use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Header, INPUT_HEIGHT, MessageList, StatusBar, WelcomePanel};

/// Draw one frame: header, status bar, conversation (or welcome), input.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(Header::HEIGHT), Length(1), Min(0), Length(INPUT_HEIGHT)]);
    let [header_area, status_area, main_area, input_area] = layout.areas(frame.area());

    Header {
        title: &app.ui.title,
        subtitle: &app.ui.subtitle,
    }
    .render(frame, header_area);

    StatusBar {
        app,
        has_unseen_content: tui.message_list.has_unseen_content(),
    }
    .render(frame, status_area);

    if app.transcript.is_empty() && !app.in_flight {
        WelcomePanel {
            assistant_name: &app.ui.assistant_name,
            message: &app.ui.welcome,
        }
        .render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.transcript,
            &app.ui.assistant_name,
            app.in_flight,
            spinner_frame,
        )
        .render(frame, main_area);
    }

    tui.input_box.render(frame, input_area);
}
