use serde::{Deserialize, Serialize};

/// Body of `GET /api/start`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StartResponse {
    pub session_id: String,
    #[serde(default)]
    pub text: String,
    /// Banner art, only ever sent on session start.
    #[serde(default)]
    pub ascii_art: Option<String>,
    /// Issued by backends that guard `/api/command` with a CSRF header.
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// Body of `POST /api/command`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommandRequest {
    pub session_id: String,
    pub command: String,
}

/// Reply to a command. `lines` wins over `text` when both are present.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CommandResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lines: Option<Vec<String>>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub clear: bool,
}
