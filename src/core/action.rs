//! # Actions
//!
//! Everything that can happen in Vita becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend replies? That's `Action::CommandCompleted { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing the I/O to perform next.
//! No I/O happens here; the TUI loop runs effects and feeds results back in.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Time is an input too (`Tick`, `received_at`), so staggered output is
//! reproducible in tests.

use std::time::Instant;

use log::{debug, info};

use crate::api::{ApiError, CommandResponse, StartResponse};
use crate::core::output::RenderSink;
use crate::core::session::PendingCommand;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// Fired once when the terminal comes up.
    Init,
    /// Typed into the input field and submitted.
    Submit(String),
    /// Predefined command from the tile panel.
    RunTile(String),
    SessionStarted(Result<StartResponse, ApiError>),
    CommandCompleted {
        result: Result<CommandResponse, ApiError>,
        received_at: Instant,
    },
    /// Promote staggered lines that are due.
    Tick(Instant),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    StartSession,
    SendCommand(PendingCommand),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Init => request_start(app),
        Action::Submit(text) => {
            let cmd = text.trim();
            if cmd.is_empty() {
                return Effect::None;
            }
            app.history.record(cmd);
            send(app, cmd)
        }
        Action::RunTile(cmd) => {
            if app.record_tile_commands {
                app.history.record(&cmd);
            }
            send(app, &cmd)
        }
        Action::SessionStarted(Ok(response)) => {
            let short_id: String = response.session_id.chars().take(8).collect();
            app.session.on_started(response, &mut app.output);
            app.status_message = format!("Connected (session {short_id})");
            Effect::None
        }
        Action::SessionStarted(Err(err)) => {
            app.session.on_start_failed(&err, &mut app.output);
            app.status_message = String::from("Offline");
            Effect::None
        }
        Action::CommandCompleted {
            result,
            received_at,
        } => {
            app.in_flight = app.in_flight.saturating_sub(1);
            match result {
                Ok(response) => {
                    app.session
                        .on_response(response, &mut app.output, received_at);
                    app.output.flush_due(received_at);
                }
                Err(err) => app.session.on_command_failed(&err, &mut app.output),
            }
            Effect::None
        }
        Action::Tick(now) => {
            let flushed = app.output.flush_due(now);
            if flushed > 0 {
                debug!("Tick promoted {} staggered lines", flushed);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn request_start(app: &mut App) -> Effect {
    if app.session.begin_start() {
        info!("Requesting session start");
        app.status_message = String::from("Connecting...");
        Effect::StartSession
    } else {
        Effect::None
    }
}

fn send(app: &mut App, cmd: &str) -> Effect {
    match app.session.prepare_command(cmd, &mut app.output) {
        Ok(pending) => {
            app.in_flight += 1;
            Effect::SendCommand(pending)
        }
        Err(_) => request_start(app),
    }
}
