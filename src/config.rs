//! Playback configuration
//!
//! Read from `~/.config/livetype/config.yaml`. Every field is optional; a
//! missing or unreadable file gives the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunables for the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Base delay between two characters, in milliseconds
    pub delay_ms: u64,
    /// Delay multiplier after a comma followed by whitespace
    pub comma_factor: u32,
    /// Delay multiplier at a blank line (end of a block)
    pub block_factor: u32,
    /// Delay multiplier after `.`, `?` or `!` followed by whitespace
    pub sentence_factor: u32,
    /// The overlay stylesheet is typed this many times faster
    pub overlay_divisor: u32,
    /// Show the finished page (paused) at launch instead of an empty one
    pub skip_on_launch: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            delay_ms: 16,
            comma_factor: 30,
            block_factor: 50,
            sentence_factor: 70,
            overlay_divisor: 2,
            skip_on_launch: true,
        }
    }
}

impl PlaybackConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, or return defaults if it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a YAML document; absent fields take their defaults
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.overlay_divisor == 0 {
            return Err("overlay_divisor must be at least 1".to_string());
        }
        Ok(())
    }
}
