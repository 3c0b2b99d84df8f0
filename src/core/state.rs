//! # Application State
//!
//! Core business state for Vita. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: SessionClient        // session handle + reply handling
//! ├── output: OutputLog             // scrollback + staggered lines
//! ├── history: History              // submitted commands, recall cursor
//! ├── status_message: String        // status bar text
//! ├── in_flight: usize              // command requests awaiting a reply
//! └── record_tile_commands: bool    // tiles feed history too
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! apart from history recall which the input box drives directly.

use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::history::History;
use crate::core::output::OutputLog;
use crate::core::session::SessionClient;

pub struct App {
    pub session: SessionClient,
    pub output: OutputLog,
    pub history: History,
    pub status_message: String,
    pub in_flight: usize,
    pub record_tile_commands: bool,
}

impl App {
    pub fn new(stagger: Duration, prompt: &str) -> Self {
        Self {
            session: SessionClient::new(stagger, prompt),
            output: OutputLog::new(),
            history: History::new(),
            status_message: String::from("Connecting..."),
            in_flight: 0,
            record_tile_commands: false,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.stagger, &config.prompt);
        app.record_tile_commands = config.record_tile_commands;
        app
    }

    /// True while something is still going to change the log on its own.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0 || self.output.pending() > 0
    }
}
