//! # Core Application Logic
//!
//! This module contains Vita's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    API     │
//!            │  Adapter   │            │  (reqwest) │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`session`]: Session handle and reply interpretation
//! - [`output`]: Scrollback log and staggered line queue
//! - [`history`]: Command history with Up/Down recall
//! - [`highlight`]: Span classification and safe markup
//! - [`config`]: Layered configuration
//! - [`transcript`]: HTML export of the scrollback on exit

pub mod action;
pub mod config;
pub mod highlight;
pub mod history;
pub mod output;
pub mod session;
pub mod state;
pub mod transcript;
