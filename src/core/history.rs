//! # Command History
//!
//! Submitted commands in order, with a recall cursor for Up/Down.
//! `cursor == entries.len()` is the live-edit slot below the newest entry.

#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Appends a non-empty command and parks the cursor on the live slot.
    pub fn record(&mut self, cmd: &str) {
        if cmd.is_empty() {
            return;
        }
        self.entries.push(cmd.to_string());
        self.cursor = self.entries.len();
    }

    /// Steps toward older entries. `None` when already at the oldest (or the
    /// history is empty), meaning the input should stay as it is.
    pub fn recall_previous(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Steps toward newer entries. Stepping past the newest returns `""` once
    /// (the live slot); after that it is a no-op.
    pub fn recall_next(&mut self) -> Option<String> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            return self.entries.get(self.cursor).cloned();
        }
        if self.cursor + 1 == self.entries.len() {
            self.cursor = self.entries.len();
            return Some(String::new());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(cmds: &[&str]) -> History {
        let mut history = History::new();
        for cmd in cmds {
            history.record(cmd);
        }
        history
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::new();
        assert_eq!(history.recall_previous(), None);
        assert_eq!(history.recall_next(), None);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_record_skips_empty() {
        let mut history = History::new();
        history.record("");
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_recall_previous_newest_first() {
        let mut history = history_of(&["a", "b", "c"]);
        assert_eq!(history.recall_previous().as_deref(), Some("c"));
        assert_eq!(history.recall_previous().as_deref(), Some("b"));
        assert_eq!(history.recall_previous().as_deref(), Some("a"));
        // stops at the oldest entry
        assert_eq!(history.recall_previous(), None);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_previous_then_next_returns_to_live_slot() {
        for n in 1..=3 {
            let mut history = history_of(&["a", "b", "c"]);
            for _ in 0..n {
                history.recall_previous();
            }
            let mut last = None;
            for _ in 0..n {
                last = history.recall_next();
            }
            assert_eq!(last.as_deref(), Some(""), "n = {n}");
            assert_eq!(history.cursor(), 3);
        }
    }

    #[test]
    fn test_next_stops_at_live_slot() {
        let mut history = history_of(&["a"]);
        history.recall_previous();
        assert_eq!(history.recall_next().as_deref(), Some(""));
        assert_eq!(history.recall_next(), None);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_record_resets_cursor_and_keeps_duplicates() {
        let mut history = history_of(&["help", "help"]);
        history.recall_previous();
        history.recall_previous();
        history.record("help");
        assert_eq!(history.entries().len(), 3);
        assert_eq!(history.cursor(), 3);
        assert_eq!(history.recall_previous().as_deref(), Some("help"));
    }
}
