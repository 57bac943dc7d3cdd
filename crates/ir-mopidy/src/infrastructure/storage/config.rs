//! TOML-based daemon configuration.
//!
//! Reads [`DaemonConfig`] from `$XDG_CONFIG_HOME/ir-mopidy/config.toml`
//! (falling back to `~/.config/ir-mopidy/config.toml`) or from an explicit
//! path given on the command line.
//!
//! # File layout (for beginners)
//!
//! ```toml
//! device = "/dev/input/event3"
//!
//! [mopidy]
//! url = "http://musicbox.local:6680/mopidy/rpc"
//!
//! [commands]
//! volume_step = 5
//! favorite_stream_uri = "http://radio.example/live.mp3"
//!
//! [[keys]]
//! name = "transport"
//! bindings = [
//!   { key = "KEY_RIGHT", direction = "UP",   callback = "next_track" },
//!   { key = "KEY_RIGHT", direction = "HOLD", callback = "scan_forward", skip_next_key = ["UP", "KEY_RIGHT"] },
//!   { key = "KEY_MENU",  direction = "DOWN" },
//! ]
//! ```
//!
//! Every `[[keys]]` group is a named list of bindings.  Groups exist only to
//! keep large remotes readable: they are flattened in file order, and a later
//! entry for the same `(direction, key)` pair replaces an earlier one.  A
//! binding without `callback` explicitly maps the key to nothing.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent, so a file containing only
//! `[[keys]]` groups is a complete configuration.
//!
//! Unlike a desktop app there is no first-run default: a daemon without key
//! bindings does nothing useful, so a missing file is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ir_mopidy_core::{BindingSpec, KeyDirection, KeyMapError, KeyMapTable, KeyPress};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::actions::CommandSettings;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file does not exist.
    #[error("config file not found at {path}")]
    NotFound { path: PathBuf },

    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("could not determine config directory (set XDG_CONFIG_HOME or HOME)")]
    NoConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonConfig {
    /// evdev device node of the IR receiver.
    #[serde(default = "default_device")]
    pub device: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub mopidy: MopidyConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    /// Binding groups, flattened in order.
    #[serde(default)]
    pub keys: Vec<KeyGroup>,
}

/// Where and how to reach Mopidy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MopidyConfig {
    /// Full URL of the JSON-RPC endpoint.
    #[serde(default = "default_mopidy_url")]
    pub url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Parameters for the player actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_volume_step")]
    pub volume_step: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_stream_uri: Option<String>,
    #[serde(default = "default_album_browse_uri")]
    pub album_browse_uri: String,
}

/// A named group of bindings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub bindings: Vec<KeyEntry>,
}

/// One `(direction, key)` binding as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyEntry {
    pub key: String,
    pub direction: KeyDirection,
    /// Action name; absent means "explicitly unmapped".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
    /// `[direction, key]` pair to swallow once after the action runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_next_key: Option<(KeyDirection, String)>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_device() -> PathBuf {
    PathBuf::from("/dev/input/event0")
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_mopidy_url() -> String {
    "http://localhost:6680/mopidy/rpc".to_string()
}
fn default_timeout_ms() -> u64 {
    5000
}
fn default_volume_step() -> u32 {
    5
}
fn default_album_browse_uri() -> String {
    "local:directory?type=album".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            log_level: default_log_level(),
            mopidy: MopidyConfig::default(),
            commands: CommandsConfig::default(),
            keys: Vec::new(),
        }
    }
}

impl Default for MopidyConfig {
    fn default() -> Self {
        Self {
            url: default_mopidy_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            volume_step: default_volume_step(),
            favorite_stream_uri: None,
            album_browse_uri: default_album_browse_uri(),
        }
    }
}

impl MopidyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl KeyEntry {
    fn to_spec(&self) -> BindingSpec {
        BindingSpec {
            key: KeyPress::new(self.direction, self.key.clone()),
            callback: self.callback.clone(),
            skip_next: self
                .skip_next_key
                .as_ref()
                .map(|(direction, key)| KeyPress::new(*direction, key.clone())),
        }
    }
}

impl DaemonConfig {
    /// All bindings from all groups, in file order.
    pub fn binding_specs(&self) -> Vec<BindingSpec> {
        self.keys
            .iter()
            .flat_map(|group| group.bindings.iter())
            .map(KeyEntry::to_spec)
            .collect()
    }

    /// Builds the lookup table, resolving every action name.
    ///
    /// # Errors
    ///
    /// Returns [`KeyMapError::UnknownAction`] for the first binding naming an
    /// action that does not exist.
    pub fn build_keymap(&self) -> Result<KeyMapTable, KeyMapError> {
        KeyMapTable::build(self.binding_specs())
    }

    pub fn command_settings(&self) -> CommandSettings {
        CommandSettings {
            volume_step: self.commands.volume_step,
            favorite_stream_uri: self.commands.favorite_stream_uri.clone(),
            album_browse_uri: self.commands.album_browse_uri.clone(),
        }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Resolves the default config file path.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] when neither `XDG_CONFIG_HOME` nor
/// `HOME` is set.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("ir-mopidy").join("config.toml"))
}

/// Loads and parses the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file does not exist,
/// [`ConfigError::Io`] for other file-system errors, and
/// [`ConfigError::Parse`] if the TOML is malformed (including unknown
/// direction names).
pub fn load_config(path: &Path) -> Result<DaemonConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parses config text.
pub fn parse_config(content: &str) -> Result<DaemonConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
