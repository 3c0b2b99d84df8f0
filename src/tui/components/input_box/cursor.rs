//! Caret tracking for the single-line command field.
//!
//! `CursorState` owns the caret byte offset and the horizontal scroll (in
//! display columns). Methods take `buffer: &str` explicitly; the text itself
//! is owned by `InputBox`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) struct CursorState {
    /// Caret as byte offset into the buffer (0..=buffer.len())
    pub pos: usize,
    /// Display columns hidden off the left edge
    pub scroll: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll: 0 }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    /// Caret column in display cells, ignoring scroll.
    pub fn column(&self, buffer: &str) -> usize {
        buffer[..self.pos].width()
    }

    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.pos != 0;
        self.pos = 0;
        moved
    }

    pub fn move_end(&mut self, buffer: &str) -> bool {
        let moved = self.pos != buffer.len();
        self.pos = buffer.len();
        moved
    }

    /// Scrolls so the caret stays inside a `width`-column window.
    pub fn update_scroll(&mut self, buffer: &str, width: usize) {
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + width {
            self.scroll = col + 1 - width;
        }
    }
}

/// The part of `buffer` visible in a `width`-column window starting at
/// display column `scroll`.
pub(super) fn visible_slice(buffer: &str, scroll: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    let mut used = 0;
    for c in buffer.chars() {
        let w = c.width().unwrap_or(0);
        if col < scroll {
            col += w;
            continue;
        }
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out
}

pub(super) fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}
