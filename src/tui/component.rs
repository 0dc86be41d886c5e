use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields; `render` takes `&mut self` so a component
/// can update caches (measured heights, scroll offsets) while drawing, the
/// same way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events and reports what they meant.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Returns `None` when the event changed nothing the parent cares about.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
