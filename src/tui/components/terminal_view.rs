//! # TerminalView Component
//!
//! Scrollable view of the output log.
//!
//! ## Responsibilities
//!
//! - Style each `RenderedLine` by class and span kind
//! - Keep ascii art unwrapped so its columns line up
//! - Snap to the bottom whenever the log changes
//! - Cache per-line heights so only new lines are measured
//!
//! ## Architecture
//!
//! `TerminalView` is a transient component (created each frame) that wraps
//! `&'a mut TerminalViewState` (persistent state) and `&'a OutputLog` (props).

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::highlight::{self, SpanKind};
use crate::core::output::{LineClass, OutputLog, RenderedLine};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Scroll and layout state for the terminal view.
/// Must be persisted in the parent TuiState.
pub struct TerminalViewState {
    pub scroll_state: ScrollViewState,
    /// When true, keep the viewport pinned to the newest line
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    pub layout: LayoutCache,
    seen_revision: u64,
}

impl Default for TerminalViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            layout: LayoutCache::new(),
            seen_revision: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// True when there is content below the viewport.
    pub fn has_content_below(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_scroll()
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable log component.
/// Created fresh each frame with references to state and data.
pub struct TerminalView<'a> {
    pub state: &'a mut TerminalViewState,
    pub log: &'a OutputLog,
}

impl<'a> TerminalView<'a> {
    pub fn new(state: &'a mut TerminalViewState, log: &'a OutputLog) -> Self {
        Self { state, log }
    }
}

impl Component for TerminalView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // Any change to the log scrolls to its newest line.
        if self.log.revision() != self.state.seen_revision {
            self.state.seen_revision = self.log.revision();
            self.state.stick_to_bottom = true;
        }

        self.state.layout.sync(self.log, content_width);
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);
        for i in visible {
            let height = self.state.layout.heights[i];
            let top = self.state.layout.top_of(i);
            let rect = Rect::new(0, top, content_width, height);
            scroll_view.render_widget(line_paragraph(&self.log.lines()[i]), rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for TerminalViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

// ── Styling ─────────────────────────────────────────────────────────────────

fn class_style(class: LineClass) -> Style {
    match class {
        LineClass::Input => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        LineClass::Output => Style::default(),
        LineClass::Error => Style::default().fg(Color::Red),
        LineClass::Ascii => Style::default().fg(Color::Cyan),
    }
}

fn span_style(kind: SpanKind, base: Style) -> Style {
    match kind {
        SpanKind::Plain => base,
        SpanKind::Link => base.fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        SpanKind::Bracket => base.fg(Color::Yellow),
        SpanKind::Label => base.fg(Color::Magenta).add_modifier(Modifier::BOLD),
        SpanKind::Number => base.fg(Color::Cyan),
    }
}

fn line_text(line: &RenderedLine) -> Text<'static> {
    let base = class_style(line.class);
    let rows = highlight::split_lines(&line.spans);
    Text::from(
        rows.into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|span| Span::styled(span.text, span_style(span.kind, base)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>(),
    )
    .style(base)
}

/// Ascii art is clipped rather than wrapped; everything else wraps without
/// trimming so indentation survives.
fn line_paragraph(line: &RenderedLine) -> Paragraph<'static> {
    let paragraph = Paragraph::new(line_text(line));
    match line.class {
        LineClass::Ascii => paragraph,
        _ => paragraph.wrap(Wrap { trim: false }),
    }
}

fn line_height(line: &RenderedLine, width: u16) -> u16 {
    let rows = match line.class {
        LineClass::Ascii => highlight::split_lines(&line.spans).len(),
        _ => line_paragraph(line).line_count(width),
    };
    u16::try_from(rows).unwrap_or(u16::MAX).max(1)
}

// ── Layout cache ────────────────────────────────────────────────────────────

/// Cached line heights for the current width and log generation.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    width: u16,
    generation: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            width: 0,
            generation: 0,
        }
    }

    /// Measures lines not yet cached. A width change or a clear invalidates
    /// everything; otherwise the log only grows, so old heights stay valid.
    pub fn sync(&mut self, log: &OutputLog, width: u16) {
        if width != self.width
            || log.generation() != self.generation
            || log.len() < self.heights.len()
        {
            self.heights.clear();
            self.prefix_heights.clear();
            self.width = width;
            self.generation = log.generation();
        }

        for line in &log.lines()[self.heights.len()..] {
            let height = line_height(line, width);
            let prev = self.prefix_heights.last().copied().unwrap_or(0);
            self.heights.push(height);
            self.prefix_heights.push(prev.saturating_add(height));
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn top_of(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        }
    }

    /// Indices of lines intersecting `[offset, offset + height)`.
    pub fn visible_range(&self, offset: u16, height: u16) -> Range<usize> {
        let bottom = offset.saturating_add(height);
        let start = self.prefix_heights.partition_point(|&end| end <= offset);
        let end = self.prefix_heights.partition_point(|&end| end < bottom);
        start..(end + 1).min(self.prefix_heights.len())
    }
}
