//! Configuration for the `spd` tool.
//!
//! Loaded once, from these sources in priority order:
//! 1. Environment variables (`SPD_CHANNELS`, `SPD_START_MARKER`, ...)
//! 2. Project-local config file (`./spd-decode.toml`)
//! 3. User config file (`~/.config/spd-decode/config.toml`)
//! 4. Built-in defaults
//!
//! # Config File Format
//!
//! ```toml
//! # Channels a capture must contain before `spd compare` runs
//! channels = ["DDR4_A", "DDR4_B", "DDR4_C", "DDR4_D"]
//!
//! # Sentinel lines around the JSON payload (substring match)
//! start_marker = "JSON DUMP START"
//! end_marker = "JSON DUMP END"
//!
//! # tracing filter when RUST_LOG is unset
//! log_filter = "warn"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spd_decode::dump::{Markers, DEFAULT_END_MARKER, DEFAULT_START_MARKER};
use spd_decode::ChannelId;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global cached configuration.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "spd-decode.toml";

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// `spd` configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Channels a capture is expected to contain.
    pub channels: Option<Vec<String>>,

    /// Substring marking the first line before the payload.
    pub start_marker: Option<String>,

    /// Substring marking the first line after the payload.
    pub end_marker: Option<String>,

    /// tracing filter directive.
    pub log_filter: Option<String>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::user_config_path() {
            if let Some(user_config) = Self::load_from_file(&path)? {
                config.merge(user_config);
            }
        }

        if let Some(local_config) = Self::load_from_file(Path::new(LOCAL_CONFIG_FILE))? {
            config.merge(local_config);
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Load on first call and cache for the rest of the process.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn init() -> Result<&'static Config> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }
        let config = Self::load()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    /// Expected channels, all four by default.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unparseable channel key.
    pub fn expected_channels(&self) -> Result<Vec<ChannelId>> {
        match &self.channels {
            None => Ok(ChannelId::ALL.to_vec()),
            Some(keys) => keys
                .iter()
                .map(|key| {
                    key.parse::<ChannelId>()
                        .with_context(|| format!("invalid channel {key:?} in configuration"))
                })
                .collect(),
        }
    }

    /// Payload sentinels, with defaults for unset keys.
    pub fn markers(&self) -> Markers {
        Markers {
            start: self
                .start_marker
                .clone()
                .unwrap_or_else(|| DEFAULT_START_MARKER.to_string()),
            end: self
                .end_marker
                .clone()
                .unwrap_or_else(|| DEFAULT_END_MARKER.to_string()),
        }
    }

    /// tracing filter, with fallback to [`DEFAULT_LOG_FILTER`].
    pub fn log_filter(&self) -> String {
        self.log_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }

    /// Path of the user config file.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("spd-decode").join("config.toml"))
    }

    /// Load configuration from a specific file, `None` if it does not exist.
    fn load_from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Merge another config into this one.
    /// Only overrides fields that are Some in the other config.
    fn merge(&mut self, other: Self) {
        if other.channels.is_some() {
            self.channels = other.channels;
        }
        if other.start_marker.is_some() {
            self.start_marker = other.start_marker;
        }
        if other.end_marker.is_some() {
            self.end_marker = other.end_marker;
        }
        if other.log_filter.is_some() {
            self.log_filter = other.log_filter;
        }
    }

    /// Apply environment overrides read through `var`.
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(list) = var("SPD_CHANNELS") {
            self.channels = Some(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(marker) = var("SPD_START_MARKER") {
            self.start_marker = Some(marker);
        }
        if let Some(marker) = var("SPD_END_MARKER") {
            self.end_marker = Some(marker);
        }
        if let Some(filter) = var("SPD_LOG") {
            self.log_filter = Some(filter);
        }
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# spd configuration
# Place this file at ~/.config/spd-decode/config.toml or ./spd-decode.toml

# Channels a capture must contain before `spd compare` runs
channels = ["DDR4_A", "DDR4_B", "DDR4_C", "DDR4_D"]

# Sentinel lines around the JSON payload (a line containing the text matches)
# start_marker = "JSON DUMP START"
# end_marker = "JSON DUMP END"

# tracing filter used when RUST_LOG is unset
# log_filter = "spd_decode=debug"
"#
        .to_string()
    }
}
