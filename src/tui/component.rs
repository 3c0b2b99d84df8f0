use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data as struct fields ("props"), may hold a
/// `&mut` to persistent state owned by `TuiState`, and draw into a `Rect`.
/// `render` takes `&mut self` so a component can record layout it needs
/// later (scroll extents, tile hit regions).
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
