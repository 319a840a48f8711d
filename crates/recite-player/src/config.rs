//! Reader configuration for recite-player
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/recite/config.yaml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Reading pace and input limits
    pub reading: ReadingConfig,
    /// Speech synthesis credentials (leave empty for subtitles-only silence)
    pub voice: VoiceConfig,
}

/// Reading settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    /// Target reading speed in words per minute
    pub wpm: u32,
    /// Maximum number of characters read from the source text
    pub char_cap: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            wpm: recite_core::DEFAULT_WPM,
            char_cap: recite_core::DEFAULT_CHAR_CAP,
        }
    }
}

/// Speech synthesis credentials section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// ElevenLabs API key
    pub api_key: String,
    /// ElevenLabs voice identifier
    pub voice_id: String,
}

impl VoiceConfig {
    /// True when both credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.voice_id.trim().is_empty()
    }
}

/// Default config file location: ~/.config/recite/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recite")
        .join("config.yaml")
}

/// Load configuration from `path`, falling back to defaults.
///
/// A missing file is normal (first run); a malformed file is reported and
/// ignored rather than aborting startup.
pub fn load_config(path: &Path) -> ReaderConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid config at {:?} ({}), using defaults", path, e);
                ReaderConfig::default()
            }
        },
        Err(_) => ReaderConfig::default(),
    }
}
