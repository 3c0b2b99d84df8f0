//! # InputBox Component
//!
//! The command field at the bottom of the terminal.
//!
//! ## Responsibilities
//!
//! - Capture text input and single-line editing (backspace, delete, caret, paste)
//! - Emit `Submit` on Enter with the trimmed command, clearing the field
//! - Turn Up/Down into history recall requests instead of caret movement
//!
//! ## State Management
//!
//! The buffer is internal state. History lives in `App`; the parent answers a
//! `RecallPrevious`/`RecallNext` by calling `set_buffer` with the recalled
//! value.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary, visible_slice};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted a non-empty command (Enter pressed)
    Submit(String),
    /// Up: parent should replace the field with an older command
    RecallPrevious,
    /// Down: parent should replace the field with a newer command
    RecallNext,
    ContentChanged,
}

/// Single-line command field.
///
/// # Props
///
/// - `prompt`: shown before the buffer, e.g. `"$ "`
/// - `busy`: dims the border while requests are outstanding
pub struct InputBox {
    pub buffer: String,
    pub prompt: String,
    pub busy: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            prompt: prompt.into(),
            busy: false,
            cursor: CursorState::new(),
        }
    }

    /// Replaces the buffer and parks the caret at the end.
    pub fn set_buffer(&mut self, value: String) {
        self.buffer = value;
        self.cursor.pos = self.buffer.len();
    }

    pub fn height() -> u16 {
        3
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = usize::from(area.width.saturating_sub(2));
        let prompt_width = self.prompt.width();
        let text_width = inner_width.saturating_sub(prompt_width);

        self.cursor.update_scroll(&self.buffer, text_width);
        let visible = visible_slice(&self.buffer, self.cursor.scroll, text_width);

        let border_style = if self.busy {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Command");

        let line = Line::from(vec![
            Span::styled(
                self.prompt.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(visible),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);

        let caret_col = self.cursor.column(&self.buffer) - self.cursor.scroll;
        let x = area.x + 1 + (prompt_width + caret_col).min(inner_width) as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // single-line field: pasted newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
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
            TuiEvent::CursorLeft => self
                .cursor
                .move_left(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .cursor
                .move_right(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorHome => self.cursor.move_home().then_some(InputEvent::ContentChanged),
            TuiEvent::CursorEnd => self
                .cursor
                .move_end(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| InputEvent::Submit(trimmed.to_string()))
            }
            TuiEvent::HistoryPrevious => Some(InputEvent::RecallPrevious),
            TuiEvent::HistoryNext => Some(InputEvent::RecallNext),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new("$ ");

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut input = InputBox::new("$ ");
        input.set_buffer("  open projects  ".to_string());

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("open projects".to_string())));
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_blank_submit_emits_nothing() {
        let mut input = InputBox::new("$ ");
        input.set_buffer("   ".to_string());
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_up_down_request_recall_without_moving_caret() {
        let mut input = InputBox::new("$ ");
        input.set_buffer("abc".to_string());
        input.handle_event(&TuiEvent::CursorLeft);

        assert_eq!(
            input.handle_event(&TuiEvent::HistoryPrevious),
            Some(InputEvent::RecallPrevious)
        );
        assert_eq!(
            input.handle_event(&TuiEvent::HistoryNext),
            Some(InputEvent::RecallNext)
        );
        assert_eq!(input.cursor.pos, 2);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new("$ ");
        input.handle_event(&TuiEvent::Paste("search\nrust".to_string()));
        assert_eq!(input.buffer, "search rust");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = InputBox::new("$ ");
        input.set_buffer("hlp".to_string());
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(input.buffer, "help");
    }

    #[test]
    fn test_render_shows_prompt_and_text() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut input = InputBox::new("$ ");
        input.set_buffer("help".to_string());

        terminal.draw(|f| {
            input.render(f, f.area());
        }).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();

        assert!(text.contains("Command"));
        assert!(text.contains("$ help"));
    }
}
