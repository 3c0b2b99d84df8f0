//! # TilePanel Component
//!
//! One row of clickable shortcuts, each running a predefined command.
//!
//! ```text
//!  F1 Help   F2 Overview   F3 Experience  ...
//! ```
//!
//! Tiles are laid out left to right and clipped at the right edge. Render
//! records where each tile landed so a later mouse click can be mapped back
//! to its command. F1..F12 address tiles by position whether or not they
//! are visible.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::config::TileEntry;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum TileEvent {
    Run(String),
}

pub struct TilePanel {
    tiles: Vec<TileEntry>,
    /// Screen rect of each rendered tile, by tile index
    hit_regions: Vec<(Rect, usize)>,
}

impl TilePanel {
    pub fn new(tiles: Vec<TileEntry>) -> Self {
        Self {
            tiles,
            hit_regions: Vec::new(),
        }
    }

    pub fn tiles(&self) -> &[TileEntry] {
        &self.tiles
    }

    pub fn height(&self) -> u16 {
        if self.tiles.is_empty() { 0 } else { 1 }
    }

    fn tile_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.hit_regions
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, index)| *index)
    }

    fn run(&self, index: usize) -> Option<TileEvent> {
        self.tiles
            .get(index)
            .map(|tile| TileEvent::Run(tile.command.clone()))
    }
}

fn tile_label(index: usize, tile: &TileEntry) -> String {
    if index < 12 {
        format!(" F{} {} ", index + 1, tile.label)
    } else {
        format!(" {} ", tile.label)
    }
}

impl Component for TilePanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hit_regions.clear();
        if area.height == 0 {
            return;
        }

        let tile_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        let mut x = area.x;
        let right = area.x.saturating_add(area.width);
        for (index, tile) in self.tiles.iter().enumerate() {
            let label = tile_label(index, tile);
            let width = u16::try_from(label.width()).unwrap_or(u16::MAX);
            if x.saturating_add(width) > right {
                break;
            }
            self.hit_regions
                .push((Rect::new(x, area.y, width, 1), index));
            spans.push(Span::styled(label, tile_style));
            spans.push(Span::raw(" "));
            x = x.saturating_add(width).saturating_add(1);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl EventHandler for TilePanel {
    type Event = TileEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Tile(index) => self.run(*index),
            TuiEvent::MouseClick(column, row) => {
                let index = self.tile_at(*column, *row)?;
                self.run(index)
            }
            _ => None,
        }
    }
}
