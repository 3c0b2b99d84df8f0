//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.vita/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VitaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub tiles: Vec<TileEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TerminalConfig {
    pub prompt: Option<String>,
    pub stagger_ms: Option<u64>,
    pub record_tile_commands: Option<bool>,
    pub transcript_file: Option<String>,
}

/// A predefined command shown in the tile panel.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileEntry {
    pub label: String,
    pub command: String,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STAGGER_MS: u64 = 40;
pub const DEFAULT_PROMPT: &str = "$ ";

fn default_tiles() -> Vec<TileEntry> {
    [
        ("Help", "help"),
        ("Overview", "open overview"),
        ("Experience", "open experience"),
        ("Projects", "open projects"),
        ("Skills", "skills"),
        ("Contact", "contact"),
        ("Clear", "clear"),
    ]
    .into_iter()
    .map(|(label, command)| TileEntry {
        label: label.to_string(),
        command: command.to_string(),
    })
    .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub prompt: String,
    pub stagger: Duration,
    pub record_tile_commands: bool,
    pub transcript_file: Option<PathBuf>,
    pub tiles: Vec<TileEntry>,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub stagger_ms: Option<u64>,
    pub transcript_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.vita/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vita").join("config.toml"))
}

/// Load config from `~/.vita/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `VitaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<VitaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(VitaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(VitaConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: VitaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Vita Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://127.0.0.1:8000"   # Or set VITA_BASE_URL / --url
# request_timeout_secs = 10

# [terminal]
# prompt = "$ "
# stagger_ms = 40                      # Delay between lines of a multi-line reply
# record_tile_commands = false         # Put tile commands into Up/Down history
# transcript_file = "transcript.html"  # Written on exit, relative to ~/.vita/

# [[tiles]]
# label = "Help"
# command = "help"

# [[tiles]]
# label = "Projects"
# command = "open projects"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &VitaConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("VITA_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Stagger: CLI → env → config → default
    let stagger_ms = cli
        .stagger_ms
        .or_else(|| {
            std::env::var("VITA_STAGGER_MS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.terminal.stagger_ms)
        .unwrap_or(DEFAULT_STAGGER_MS);

    // Transcript: CLI path as given; config path is relative to ~/.vita/
    let transcript_file = cli.transcript_file.clone().or_else(|| {
        config.terminal.transcript_file.as_ref().map(|file| {
            match dirs::home_dir() {
                Some(home) => home.join(".vita").join(file),
                None => PathBuf::from(file),
            }
        })
    });

    let tiles = if config.tiles.is_empty() {
        default_tiles()
    } else {
        config.tiles.clone()
    };

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(
            config
                .server
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        prompt: config
            .terminal
            .prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        stagger: Duration::from_millis(stagger_ms),
        record_tile_commands: config.terminal.record_tile_commands.unwrap_or(false),
        transcript_file,
        tiles,
    }
}
