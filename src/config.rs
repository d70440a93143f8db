//! @dose
//! purpose: Configuration file parsing for tokcount.toml. Supplies defaults for the model,
//!     an encoding override and the special-token policy.
//!
//! when-editing:
//!     - !Every key is optional; command-line flags take precedence over the file
//!     - Config is loaded once at startup and passed to the count command
//!
//! invariants:
//!     - Config::load returns the default config if tokcount.toml doesn't exist
//!     - A malformed or unreadable file logs a warning and falls back to defaults

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "tokcount.toml";

/// Main configuration structure matching tokcount.toml
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Model whose encoding is used for counting
    pub model: Option<String>,

    /// Encoding name that bypasses the model lookup
    pub encoding: Option<String>,

    /// Count special-token strings instead of rejecting them
    pub allow_special: Option<bool>,
}

impl Config {
    /// Load configuration from tokcount.toml in the given directory
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::debug!(path = %config_path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", config_path.display(), e);
                Self::default()
            }
        }
    }
}
