//! # TitleBar Component
//!
//! Top status bar: which backend we talk to, connection status, and a
//! "↓ More" marker while scrolled away from the newest output.
//!
//! Stateless: everything comes in as props, so rendering is a pure function
//! of the fields.
//!
//! ## Conditional Formatting
//!
//! 1. **Content below**: `"Vita Terminal (host) | Connected | ↓ More"`
//! 2. **Status message**: `"Vita Terminal (host) | Connected"`
//! 3. **Default**: `"Vita Terminal (host)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
///
/// # Props
///
/// - `host`: backend base URL without scheme
/// - `status_message`: connection status ("Connecting...", "Offline", ...)
/// - `has_content_below`: there is output below the viewport
pub struct TitleBar {
    pub host: String,
    pub status_message: String,
    pub has_content_below: bool,
}

impl TitleBar {
    pub fn new(base_url: &str, status_message: String, has_content_below: bool) -> Self {
        Self {
            host: strip_scheme(base_url).to_string(),
            status_message,
            has_content_below,
        }
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.has_content_below {
            format!(
                "Vita Terminal ({}) | {} | ↓ More",
                self.host, self.status_message
            )
        } else if self.status_message.is_empty() {
            format!("Vita Terminal ({})", self.host)
        } else {
            format!("Vita Terminal ({}) | {}", self.host, self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
