//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into core::Action values, and runs
//! the effects `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop redraws only after an event, a background result, or a change
//! to the log. Its poll timeout follows the work in hand:
//!
//! - **Staggered lines queued**: sleeps until the next one is due.
//! - **Requests in flight**: polls every 25ms to pick up replies.
//! - **Idle**: sleeps up to 500ms.
//!
//! ## Background Work
//!
//! Network calls run as tokio tasks holding an `Arc<dyn SessionApi>`. They
//! send their result back as an `Action` over a std mpsc channel; the loop
//! drains the channel every iteration, so all state stays on this thread.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::JoinHandle;

use crate::api::{HttpSessionApi, SessionApi};
use crate::core::action::{Action, Effect, update};
use crate::core::config::{ResolvedConfig, TileEntry};
use crate::core::session::PendingCommand;
use crate::core::state::App;
use crate::core::transcript;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, TerminalViewState, TileEvent, TilePanel};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(25);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub base_url: String,
    pub terminal_view: TerminalViewState,
    pub tile_panel: TilePanel,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new(base_url: &str, prompt: &str, tiles: Vec<TileEntry>) -> Self {
        Self {
            base_url: base_url.to_string(),
            terminal_view: TerminalViewState::new(),
            tile_panel: TilePanel::new(tiles),
            input_box: InputBox::new(prompt),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// How long the loop may block waiting for input.
fn poll_timeout(app: &App, now: Instant) -> Duration {
    match app.output.next_due() {
        Some(due) => due.saturating_duration_since(now).min(IDLE_POLL),
        None if app.in_flight > 0 => BUSY_POLL,
        None => IDLE_POLL,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn SessionApi> = Arc::new(
        HttpSessionApi::new(config.base_url.clone(), config.request_timeout)
            .map_err(|e| std::io::Error::other(e.to_string()))?,
    );
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&config.base_url, &config.prompt, config.tiles.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let effect = update(&mut app, Action::Init);
    run_effect(effect, &api, &tx);

    let mut needs_redraw = true; // Force first frame
    let mut last_revision = app.output.revision();
    let mut last_status = app.status_message.clone();

    loop {
        if app.output.pending() > 0 {
            update(&mut app, Action::Tick(Instant::now()));
        }

        if app.output.revision() != last_revision || app.status_message != last_status {
            last_revision = app.output.revision();
            last_status.clone_from(&app.status_message);
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(poll_timeout(&app, Instant::now()));

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit | TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.terminal_view.handle_event(&event);
                }
                TuiEvent::Tile(_) | TuiEvent::MouseClick(_, _) => {
                    if let Some(TileEvent::Run(command)) = tui.tile_panel.handle_event(&event) {
                        let effect = update(&mut app, Action::RunTile(command));
                        run_effect(effect, &api, &tx);
                    }
                }
                _ => {
                    if let Some(input_event) = tui.input_box.handle_event(&event) {
                        handle_input_event(input_event, &mut app, &mut tui, &api, &tx);
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, applied_at(action, Instant::now()));
            run_effect(effect, &api, &tx);
        }
    }

    transcript::save_on_exit(config.transcript_file.as_deref(), &app.output);

    ratatui::restore();
    Ok(())
}

/// Re-stamps a command reply with the instant the loop applies it, so the
/// stagger schedule starts when the first line is actually shown.
fn applied_at(action: Action, now: Instant) -> Action {
    match action {
        Action::CommandCompleted { result, .. } => Action::CommandCompleted {
            result,
            received_at: now,
        },
        other => other,
    }
}

fn handle_input_event(
    input_event: InputEvent,
    app: &mut App,
    tui: &mut TuiState,
    api: &Arc<dyn SessionApi>,
    tx: &mpsc::Sender<Action>,
) {
    match input_event {
        InputEvent::Submit(text) => {
            let effect = update(app, Action::Submit(text));
            run_effect(effect, api, tx);
        }
        InputEvent::RecallPrevious => {
            if let Some(entry) = app.history.recall_previous() {
                tui.input_box.set_buffer(entry);
            }
        }
        InputEvent::RecallNext => {
            if let Some(entry) = app.history.recall_next() {
                tui.input_box.set_buffer(entry);
            }
        }
        InputEvent::ContentChanged => {}
    }
}

/// Performs the I/O an `Effect` describes. `Effect::Quit` is handled by the
/// loop itself.
fn run_effect(
    effect: Effect,
    api: &Arc<dyn SessionApi>,
    tx: &mpsc::Sender<Action>,
) -> Option<JoinHandle<()>> {
    match effect {
        Effect::StartSession => Some(spawn_start(api.clone(), tx.clone())),
        Effect::SendCommand(pending) => Some(spawn_command(api.clone(), pending, tx.clone())),
        Effect::None | Effect::Quit => None,
    }
}

fn spawn_start(api: Arc<dyn SessionApi>, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    info!("Spawning session start");
    tokio::spawn(async move {
        let result = api.start().await;
        if let Err(e) = &result {
            warn!("Session start failed: {}", e);
        }
        if tx.send(Action::SessionStarted(result)).is_err() {
            warn!("Failed to send SessionStarted: receiver dropped");
        }
    })
}

fn spawn_command(
    api: Arc<dyn SessionApi>,
    pending: PendingCommand,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning command request: {:?}", pending.request.command);
    tokio::spawn(async move {
        let result = api
            .command(&pending.request, pending.csrf_token.as_deref())
            .await;
        if let Err(e) = &result {
            warn!("Command {:?} failed: {}", pending.request.command, e);
        }
        let action = Action::CommandCompleted {
            result,
            received_at: Instant::now(),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send CommandCompleted: receiver dropped");
        }
    })
}
