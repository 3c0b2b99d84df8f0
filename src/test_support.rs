//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, CommandRequest, CommandResponse, SessionApi, StartResponse};
use crate::core::action::{Action, update};
use crate::core::state::App;

/// A `SessionApi` that replays canned replies and records what it was sent.
#[derive(Default)]
pub struct ScriptedApi {
    pub start_reply: Mutex<Option<Result<StartResponse, ApiError>>>,
    pub command_replies: Mutex<VecDeque<Result<CommandResponse, ApiError>>>,
    pub sent: Mutex<Vec<(CommandRequest, Option<String>)>>,
}

impl ScriptedApi {
    pub fn with_start(reply: Result<StartResponse, ApiError>) -> Self {
        let api = Self::default();
        *api.start_reply.lock().unwrap() = Some(reply);
        api
    }

    pub fn push_command(&self, reply: Result<CommandResponse, ApiError>) {
        self.command_replies.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl SessionApi for ScriptedApi {
    async fn start(&self) -> Result<StartResponse, ApiError> {
        self.start_reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted start".into())))
    }

    async fn command(
        &self,
        request: &CommandRequest,
        csrf_token: Option<&str>,
    ) -> Result<CommandResponse, ApiError> {
        self.sent
            .lock()
            .unwrap()
            .push((request.clone(), csrf_token.map(str::to_string)));
        self.command_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())))
    }
}

/// Creates a test App with a short stagger and the default prompt.
pub fn test_app() -> App {
    App::new(Duration::from_millis(10), "$ ")
}

/// A test App whose session has already started, with an empty log.
pub fn started_app() -> App {
    let mut app = test_app();
    update(&mut app, Action::Init);
    update(
        &mut app,
        Action::SessionStarted(Ok(StartResponse {
            session_id: "test-session".to_string(),
            text: String::new(),
            ascii_art: None,
            csrf_token: None,
        })),
    );
    app
}
