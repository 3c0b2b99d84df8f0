//! # Session Client
//!
//! Owns the backend session handle and turns replies into output.
//!
//! ```text
//!             begin_start()            on_started()
//! Unstarted ───────────────► Starting ──────────────► Started
//!     ▲                          │
//!     └──────────────────────────┘
//!          on_start_failed()
//! ```
//!
//! `Started` is reached at most once and never left. A failed start drops
//! back to `Unstarted` so the next command can retry it.
//!
//! No I/O happens here: requests are handed back to the caller as values and
//! replies are fed in once they arrive. Everything visible goes through a
//! `RenderSink`.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::api::{ApiError, CommandRequest, CommandResponse, StartResponse};
use crate::core::output::{LineClass, RenderSink};

/// Prefix of the visible fallback line for transport/decode failures.
pub const UNREACHABLE_PREFIX: &str = "could not reach session";
pub const NOT_READY_NOTICE: &str = "Session not ready yet, try again in a moment.";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub csrf_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unstarted,
    Starting,
    Started(Session),
}

/// A command ready to go over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommand {
    pub request: CommandRequest,
    pub csrf_token: Option<String>,
}

#[derive(Debug)]
pub struct SessionClient {
    state: SessionState,
    stagger: Duration,
    prompt: String,
}

impl SessionClient {
    pub fn new(stagger: Duration, prompt: impl Into<String>) -> Self {
        Self {
            state: SessionState::Unstarted,
            stagger,
            prompt: prompt.into(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Started(session) => Some(session),
            _ => None,
        }
    }

    pub fn stagger(&self) -> Duration {
        self.stagger
    }

    /// Moves `Unstarted → Starting`. Returns whether a start request should
    /// actually be issued; `false` while one is in flight or once started.
    pub fn begin_start(&mut self) -> bool {
        if self.state == SessionState::Unstarted {
            self.state = SessionState::Starting;
            true
        } else {
            false
        }
    }

    /// Stores the session handle and prints the banner: art first, then text.
    pub fn on_started(&mut self, response: StartResponse, sink: &mut impl RenderSink) {
        if let SessionState::Started(existing) = &self.state {
            warn!(
                "Ignoring second start response (have session {}, got {})",
                existing.id, response.session_id
            );
            return;
        }

        info!("Session started: {}", response.session_id);
        self.state = SessionState::Started(Session {
            id: response.session_id,
            csrf_token: response.csrf_token,
        });

        if let Some(art) = response.ascii_art.as_deref() {
            sink.print(art, LineClass::Ascii);
        }
        sink.print(&response.text, LineClass::Output);
    }

    pub fn on_start_failed(&mut self, err: &ApiError, sink: &mut impl RenderSink) {
        warn!("Session start failed ({:?}): {}", err.kind(), err);
        if self.state == SessionState::Starting {
            self.state = SessionState::Unstarted;
        }
        sink.print(&format!("{UNREACHABLE_PREFIX}: {err}"), LineClass::Error);
    }

    /// Echoes the command and builds its request.
    ///
    /// The echo is printed even when there is no session yet, so the user
    /// always sees what they typed. In that case the command itself is
    /// dropped and `ApiError::NotStarted` is returned.
    pub fn prepare_command(
        &mut self,
        cmd: &str,
        sink: &mut impl RenderSink,
    ) -> Result<PendingCommand, ApiError> {
        sink.print(&format!("{}{}", self.prompt, cmd), LineClass::Input);

        let Some(session) = self.session() else {
            warn!("Dropping command before session start: {:?}", cmd);
            sink.print(
                NOT_READY_NOTICE,
                LineClass::Error,
            );
            return Err(ApiError::NotStarted);
        };

        Ok(PendingCommand {
            request: CommandRequest {
                session_id: session.id.clone(),
                command: cmd.to_string(),
            },
            csrf_token: session.csrf_token.clone(),
        })
    }

    /// Renders a reply received at `now`.
    ///
    /// `clear` wipes first. A `lines` reply is staggered, line *i* due at
    /// `now + i × stagger`; otherwise `text` is printed right away. The
    /// `error` flag picks the class for the whole batch.
    pub fn on_response(&self, response: CommandResponse, sink: &mut impl RenderSink, now: Instant) {
        if response.clear {
            sink.clear();
        }

        let class = if response.error {
            LineClass::Error
        } else {
            LineClass::Output
        };

        match response.lines {
            Some(lines) => {
                debug!("Scheduling {} staggered lines", lines.len());
                for (i, line) in lines.iter().enumerate() {
                    let due = now + self.stagger * i as u32;
                    sink.schedule(line, class, due);
                }
            }
            None => {
                if let Some(text) = response.text.as_deref() {
                    sink.print(text, class);
                }
            }
        }
    }

    /// Transport or decode failure on a command. The session stays usable.
    pub fn on_command_failed(&self, err: &ApiError, sink: &mut impl RenderSink) {
        warn!("Command failed ({:?}): {}", err.kind(), err);
        sink.print(&format!("{UNREACHABLE_PREFIX}: {err}"), LineClass::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output::OutputLog;

    fn started_client() -> SessionClient {
        let mut client = SessionClient::new(Duration::from_millis(10), "$ ");
        let mut sink = OutputLog::new();
        assert!(client.begin_start());
        client.on_started(
            StartResponse {
                session_id: "s-1".into(),
                text: String::new(),
                ascii_art: None,
                csrf_token: Some("tok".into()),
            },
            &mut sink,
        );
        client
    }

    #[test]
    fn test_begin_start_only_once() {
        let mut client = SessionClient::new(Duration::ZERO, "$ ");
        assert!(client.begin_start());
        assert_eq!(client.state(), &SessionState::Starting);
        assert!(!client.begin_start());
    }

    #[test]
    fn test_start_prints_ascii_before_text() {
        let mut client = SessionClient::new(Duration::ZERO, "$ ");
        let mut sink = OutputLog::new();
        client.begin_start();
        client.on_started(
            StartResponse {
                session_id: "abc".into(),
                text: "B".into(),
                ascii_art: Some("A".into()),
                csrf_token: None,
            },
            &mut sink,
        );

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].raw, "A");
        assert_eq!(lines[0].class, LineClass::Ascii);
        assert_eq!(lines[1].raw, "B");
        assert_eq!(lines[1].class, LineClass::Output);
        assert_eq!(client.session().map(|s| s.id.as_str()), Some("abc"));
    }

    #[test]
    fn test_second_start_response_ignored() {
        let mut client = started_client();
        let mut sink = OutputLog::new();
        client.on_started(
            StartResponse {
                session_id: "other".into(),
                text: "again".into(),
                ascii_art: None,
                csrf_token: None,
            },
            &mut sink,
        );
        assert_eq!(client.session().map(|s| s.id.as_str()), Some("s-1"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_start_failure_allows_retry() {
        let mut client = SessionClient::new(Duration::ZERO, "$ ");
        let mut sink = OutputLog::new();
        client.begin_start();
        client.on_start_failed(&ApiError::Network("connection refused".into()), &mut sink);

        assert_eq!(client.state(), &SessionState::Unstarted);
        assert_eq!(sink.lines()[0].class, LineClass::Error);
        assert!(sink.lines()[0].raw.starts_with(UNREACHABLE_PREFIX));
        assert!(client.begin_start());
    }

    #[test]
    fn test_prepare_command_before_start_echoes_and_drops() {
        let mut client = SessionClient::new(Duration::ZERO, "$ ");
        let mut sink = OutputLog::new();
        let result = client.prepare_command("help", &mut sink);

        assert_eq!(result, Err(ApiError::NotStarted));
        assert_eq!(sink.lines()[0].raw, "$ help");
        assert_eq!(sink.lines()[0].class, LineClass::Input);
        assert_eq!(sink.lines()[1].class, LineClass::Error);
    }

    #[test]
    fn test_not_ready_notice_while_first_start_in_flight() {
        let mut client = SessionClient::new(Duration::ZERO, "$ ");
        assert!(client.begin_start());
        let mut sink = OutputLog::new();
        let result = client.prepare_command("help", &mut sink);

        assert_eq!(result, Err(ApiError::NotStarted));
        assert_eq!(sink.lines()[1].raw, "Session not ready yet, try again in a moment.");
        assert!(!sink.lines()[1].raw.contains("Reconnecting"));
    }

    #[test]
    fn test_prepare_command_carries_session_and_token() {
        let mut client = started_client();
        let mut sink = OutputLog::new();
        let pending = client.prepare_command("open projects", &mut sink).unwrap();

        assert_eq!(pending.request.session_id, "s-1");
        assert_eq!(pending.request.command, "open projects");
        assert_eq!(pending.csrf_token.as_deref(), Some("tok"));
        assert_eq!(sink.lines()[0].raw, "$ open projects");
    }

    #[test]
    fn test_lines_are_staggered_with_uniform_class() {
        let client = started_client();
        let mut sink = OutputLog::new();
        let now = Instant::now();
        client.on_response(
            CommandResponse {
                lines: Some(vec!["x".into(), "y".into()]),
                error: true,
                ..Default::default()
            },
            &mut sink,
            now,
        );

        assert!(sink.is_empty());
        assert_eq!(sink.flush_due(now), 1);
        assert_eq!(sink.flush_due(now + Duration::from_millis(10)), 1);

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].raw, "x");
        assert_eq!(lines[1].raw, "y");
        assert!(lines.iter().all(|l| l.class == LineClass::Error));
    }

    #[test]
    fn test_lines_win_over_text() {
        let client = started_client();
        let mut sink = OutputLog::new();
        let now = Instant::now();
        client.on_response(
            CommandResponse {
                text: Some("ignored".into()),
                lines: Some(vec!["kept".into()]),
                ..Default::default()
            },
            &mut sink,
            now,
        );
        sink.flush_due(now);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.lines()[0].raw, "kept");
    }

    #[test]
    fn test_clear_wipes_before_render() {
        let client = started_client();
        let mut sink = OutputLog::new();
        sink.print("old 1", LineClass::Output);
        sink.print("old 2", LineClass::Input);

        client.on_response(
            CommandResponse {
                text: Some(String::new()),
                clear: true,
                ..Default::default()
            },
            &mut sink,
            Instant::now(),
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_command_failure_is_visible() {
        let client = started_client();
        let mut sink = OutputLog::new();
        client.on_command_failed(&ApiError::Decode("expected value".into()), &mut sink);
        assert_eq!(sink.lines()[0].class, LineClass::Error);
        assert!(sink.lines()[0].raw.contains("expected value"));
    }
}
