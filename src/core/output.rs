//! # Output Log
//!
//! The terminal's scrollback. Lines are appended, never edited, and only
//! removed all at once by `clear()`.
//!
//! Staggered multi-line replies are queued here as `ScheduledLine`s and
//! promoted to the visible log by `flush_due(now)`. Queued lines survive a
//! clear and a later command: they belong to a reply that is already in
//! flight, and the log is append-only so interleaving is harmless.
//!
//! ```text
//! print ─────────────────────────────► lines ─► revision += 1
//! schedule ─► scheduled ─► flush_due ─┘
//! ```

use std::time::Instant;

use crate::core::highlight::{self, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    Input,
    Output,
    Error,
    Ascii,
}

impl LineClass {
    pub fn as_str(self) -> &'static str {
        match self {
            LineClass::Input => "input",
            LineClass::Output => "output",
            LineClass::Error => "error",
            LineClass::Ascii => "ascii",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub raw: String,
    pub spans: Vec<Span>,
    pub class: LineClass,
}

impl RenderedLine {
    pub fn new(text: &str, class: LineClass) -> Self {
        let spans = match class {
            LineClass::Ascii => highlight::verbatim(text),
            _ => highlight::highlight(text),
        };
        Self {
            raw: text.to_string(),
            spans,
            class,
        }
    }

    /// Markup for this line. Ascii art is escaped but otherwise untouched.
    pub fn markup(&self) -> String {
        match self.class {
            LineClass::Ascii => highlight::escape_html(&self.raw),
            _ => highlight::to_markup(&self.spans),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledLine {
    pub due: Instant,
    seq: u64,
    pub text: String,
    pub class: LineClass,
}

/// Where the session client writes. `OutputLog` is the real one; tests can
/// substitute their own.
pub trait RenderSink {
    fn print(&mut self, text: &str, class: LineClass);
    fn clear(&mut self);
    fn schedule(&mut self, text: &str, class: LineClass, due: Instant);
}

#[derive(Debug, Default)]
pub struct OutputLog {
    lines: Vec<RenderedLine>,
    scheduled: Vec<ScheduledLine>,
    next_seq: u64,
    /// Bumped on every append or clear. Views compare it to decide when to
    /// snap back to the bottom.
    revision: u64,
    /// Bumped on clear only, so cached layout can tell a wiped log apart
    /// from one that merely grew.
    generation: u64,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }

    /// Earliest instant at which a queued line becomes visible.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduled.iter().map(|s| s.due).min()
    }

    /// Promotes every queued line due at or before `now`, earliest first.
    /// Lines sharing a due instant keep their scheduling order.
    pub fn flush_due(&mut self, now: Instant) -> usize {
        let (mut ready, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.scheduled)
                .into_iter()
                .partition(|s| s.due <= now);
        self.scheduled = waiting;
        ready.sort_by_key(|s| (s.due, s.seq));

        let count = ready.len();
        for line in ready {
            self.print(&line.text, line.class);
        }
        count
    }

    /// Whole log as markup, one element per line.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let tag = if line.class == LineClass::Ascii { "pre" } else { "div" };
            out.push_str(&format!(
                "<{tag} class=\"{}\">{}</{tag}>\n",
                line.class.as_str(),
                line.markup()
            ));
        }
        out
    }
}

impl RenderSink for OutputLog {
    fn print(&mut self, text: &str, class: LineClass) {
        if text.is_empty() {
            return;
        }
        self.lines.push(RenderedLine::new(text, class));
        self.revision += 1;
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.revision += 1;
        self.generation += 1;
    }

    fn schedule(&mut self, text: &str, class: LineClass, due: Instant) {
        self.scheduled.push(ScheduledLine {
            due,
            seq: self.next_seq,
            text: text.to_string(),
            class,
        });
        self.next_seq += 1;
    }
}
