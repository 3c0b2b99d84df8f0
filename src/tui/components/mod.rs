//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: backend host, connection status, scroll marker
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: command field, emits submits and history recall requests
//! - `TerminalView`: scrollable output log with layout caching
//! - `TilePanel`: predefined command shortcuts, clickable or via F-keys
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into `App`:
//!
//! ```rust,ignore
//! TitleBar::new(&tui.base_url, app.status_message.clone(), below).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (top status bar)
//! ├── terminal_view.rs  (scrollback)
//! ├── tile_panel.rs     (shortcut row)
//! └── input_box/        (command field + caret)
//! ```

pub mod input_box;
pub mod terminal_view;
pub mod tile_panel;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use terminal_view::{TerminalView, TerminalViewState};
pub use tile_panel::{TileEvent, TilePanel};
pub use title_bar::TitleBar;
