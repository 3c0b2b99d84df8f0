//! # Transcript Export
//!
//! Writes the scrollback to an HTML file when the terminal closes, using the
//! same markup the highlighter produces for each line.
//!
//! Writes are atomic (`.tmp` then `rename()`), so an interrupted exit never
//! leaves a half-written transcript behind.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Utc;
use log::{debug, warn};

use crate::core::output::OutputLog;

/// Full HTML document for `log`, stamped with the export time.
pub fn render_transcript(log: &OutputLog) -> String {
    format!(
        "<!-- vita transcript, exported {} -->\n<div class=\"terminal\">\n{}</div>\n",
        Utc::now().to_rfc3339(),
        log.to_html()
    )
}

/// Atomically writes the transcript of `log` to `path`.
pub fn save_transcript(path: &Path, log: &OutputLog) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, render_transcript(log))?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Saves the transcript if a path is configured and there is anything to
/// save. Failures are logged, never fatal.
pub fn save_on_exit(path: Option<&Path>, log: &OutputLog) {
    let Some(path) = path else {
        return;
    };
    if log.is_empty() {
        debug!("Transcript skipped: nothing to save");
        return;
    }
    match save_transcript(path, log) {
        Ok(()) => debug!("Transcript saved to {}", path.display()),
        Err(e) => warn!("Failed to save transcript to {}: {}", path.display(), e),
    }
}
