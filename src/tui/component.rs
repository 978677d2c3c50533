use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props are plain struct fields set by the parent before each draw. Stateful
/// components borrow their persistent state (`&mut XState`) as a field, so
/// `render` takes `&mut self` and may refresh caches or clamp scroll while
/// drawing, the same way a ratatui `StatefulWidget` would.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns raw terminal events into component-level events.
///
/// Implemented on the persistent state rather than the per-frame component,
/// because only the state outlives a frame.
pub trait EventHandler {
    type Event;

    /// `None` when the event was ignored or needs no reaction from the parent.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
