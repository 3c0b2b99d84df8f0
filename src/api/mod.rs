//! # Session API
//!
//! Wire types and the HTTP transport for the resume backend's two endpoints:
//! `GET /api/start` and `POST /api/command`.

pub mod client;
pub mod types;

pub use client::{ApiError, FailureKind, HttpSessionApi, SessionApi};
pub use types::{CommandRequest, CommandResponse, StartResponse};
