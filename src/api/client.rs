use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{CommandRequest, CommandResponse, StartResponse};

/// Header carrying the token handed out by `/api/start`.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Errors that can occur while talking to the session backend.
///
/// Application-level errors (`"error": true` in a well-formed reply) are not
/// represented here; they are ordinary responses.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Body was not the expected JSON shape.
    Decode(String),
    /// A command was attempted before a session id was assigned.
    NotStarted,
}

/// Coarse classification used for logging and the visible fallback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Decode,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Decode(_) => FailureKind::Decode,
            ApiError::Network(_) | ApiError::Api { .. } | ApiError::NotStarted => {
                FailureKind::Transport
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Decode(msg) => write!(f, "unexpected response: {msg}"),
            ApiError::NotStarted => write!(f, "session not started"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The two calls the terminal makes against its backend.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// `GET /api/start`
    async fn start(&self) -> Result<StartResponse, ApiError>;

    /// `POST /api/command`, with the CSRF header when one was issued.
    async fn command(
        &self,
        request: &CommandRequest,
        csrf_token: Option<&str>,
    ) -> Result<CommandResponse, ApiError>;
}

/// reqwest-backed client. Keeps a cookie store so cookie-based sessions
/// survive between calls.
pub struct HttpSessionApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSessionApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reads the body and decodes it, keeping status and decode failures apart.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        debug!("Session API response status: {}", status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Session API error: {} - {}", status.as_u16(), err_body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to decode session API body ({} bytes): {}", body.len(), e);
            ApiError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn start(&self) -> Result<StartResponse, ApiError> {
        info!("Starting session at {}", self.base_url);
        let response = self
            .client
            .get(format!("{}/api/start", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn command(
        &self,
        request: &CommandRequest,
        csrf_token: Option<&str>,
    ) -> Result<CommandResponse, ApiError> {
        debug!(
            "Sending command (session={}, len={})",
            request.session_id,
            request.command.len()
        );
        let mut builder = self
            .client
            .post(format!("{}/api/command", self.base_url))
            .json(request);
        if let Some(token) = csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(ApiError::Network("refused".into()).kind(), FailureKind::Transport);
        assert_eq!(
            ApiError::Api { status: 500, message: "boom".into() }.kind(),
            FailureKind::Transport
        );
        assert_eq!(ApiError::Decode("eof".into()).kind(), FailureKind::Decode);
        assert_eq!(ApiError::NotStarted.kind(), FailureKind::Transport);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Api { status: 403, message: "bad token".into() };
        assert_eq!(err.to_string(), "HTTP 403: bad token");
        assert_eq!(ApiError::NotStarted.to_string(), "session not started");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpSessionApi::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
    }
}
