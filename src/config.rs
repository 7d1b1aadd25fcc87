//! Application configuration
//!
//! Loaded from a TOML file. Every field has a default, so an empty or
//! missing file yields the standard ten cycles of ten-second phases with
//! sound on.

use crate::error::{BreatheError, Result};
use crate::session::SessionParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "BREATHE_CONFIG";

/// Top-level configuration
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BreatheConfig {
    pub session: SessionSection,
    pub audio: AudioSection,
    pub ui: UiSection,
}

/// Timer settings
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSection {
    /// Length of each inhale and exhale, in ticks
    pub phase_seconds: u32,
    /// Number of inhale+exhale cycles per session
    pub cycles: u32,
    /// Wall-clock length of one tick in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            phase_seconds: 10,
            cycles: 10,
            tick_interval_ms: 1000,
        }
    }
}

/// Ambient sound settings
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioSection {
    /// Whether sound starts enabled
    pub sound_enabled: bool,
    /// Track to loop during the session; silence if absent
    pub ambient_track: Option<PathBuf>,
    /// Playback volume in `[0, 1]`
    pub volume: f32,
}

impl Default for AudioSection {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            ambient_track: None,
            volume: 0.8,
        }
    }
}

/// Presentation settings
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiSection {
    pub title: String,
    pub quote: String,
    pub light_theme: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            title: "Mindful Breathing".to_string(),
            quote: "Breathe in peace, breathe out tension".to_string(),
            light_theme: false,
        }
    }
}

impl BreatheConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: BreatheConfig = toml::from_str(content)
            .map_err(|e| BreatheError::ConfigError(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BreatheError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            BreatheError::ConfigError(msg) => {
                BreatheError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `$BREATHE_CONFIG` or the user config directory
    ///
    /// Falls back to defaults when no file exists. A file that exists but
    /// does not parse is an error.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Where the configuration is looked up
    pub fn default_path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir().map(|dir| dir.join("breathe").join("config.toml"))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.session.phase_seconds == 0 {
            return Err(BreatheError::ConfigError(
                "session.phase_seconds must be at least 1".to_string(),
            ));
        }
        if self.session.tick_interval_ms == 0 {
            return Err(BreatheError::ConfigError(
                "session.tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(BreatheError::ConfigError(format!(
                "audio.volume must be within 0.0..=1.0, got {}",
                self.audio.volume
            )));
        }
        Ok(())
    }

    /// Session parameters derived from the config
    pub fn session_params(&self) -> SessionParams {
        SessionParams::new(self.session.phase_seconds, self.session.cycles)
    }

    /// Tick interval as a duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.session.tick_interval_ms)
    }

    /// Set the phase length
    pub fn with_phase_seconds(mut self, seconds: u32) -> Self {
        self.session.phase_seconds = seconds;
        self
    }

    /// Set the cycle count
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.session.cycles = cycles;
        self
    }

    /// Set the tick interval
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.session.tick_interval_ms = ms;
        self
    }

    /// Set whether sound starts enabled
    pub fn with_sound_enabled(mut self, enabled: bool) -> Self {
        self.audio.sound_enabled = enabled;
        self
    }

    /// Set the ambient track
    pub fn with_ambient_track<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.audio.ambient_track = Some(path.into());
        self
    }
}
