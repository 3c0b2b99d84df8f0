use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InputBox, TerminalView, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draws one frame: title bar, scrollback, tile row and command field.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(1),
        Min(0),
        Length(tui.tile_panel.height()),
        Length(InputBox::height()),
    ]);
    let [title_area, main_area, tiles_area, input_area] = layout.areas(frame.area());

    TerminalView::new(&mut tui.terminal_view, &app.output).render(frame, main_area);

    // after the view so the marker reflects this frame's scroll position
    TitleBar::new(
        &tui.base_url,
        app.status_message.clone(),
        tui.terminal_view.has_content_below(),
    )
    .render(frame, title_area);

    tui.tile_panel.render(frame, tiles_area);

    tui.input_box.busy = app.is_busy();
    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TileEntry;
    use crate::core::output::{LineClass, RenderSink};
    use crate::test_support::started_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_draw_ui_shows_every_region() {
        let mut app = started_app();
        app.output.print("Welcome to the terminal", LineClass::Output);

        let mut tui = TuiState::new(
            "http://127.0.0.1:8000",
            "$ ",
            vec![TileEntry {
                label: "Help".to_string(),
                command: "help".to_string(),
            }],
        );

        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Vita Terminal (127.0.0.1:8000)"));
        assert!(text.contains("Connected (session test-ses)"));
        assert!(text.contains("Welcome to the terminal"));
        assert!(text.contains("F1 Help"));
        assert!(text.contains("Command"));
    }
}
