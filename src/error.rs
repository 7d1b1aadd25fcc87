//! Error types for the Breathe application
//!
//! The session core itself is total and never fails; these errors come from
//! the edges: the clock thread, audio output, configuration and scenarios.

use thiserror::Error;

/// Breathe application errors
#[derive(Error, Debug, Clone)]
pub enum BreatheError {
    /// Audio output device could not be opened
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Play/pause or decoding of the ambient track failed
    #[error("Audio playback error: {0}")]
    AudioPlaybackError(String),

    /// The phase clock could not be armed
    #[error("Clock error: {0}")]
    ClockError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File system I/O error
    #[error("IO error: {0}")]
    IOError(String),

    /// Scripted scenario could not be loaded or executed
    #[error("Scenario error: {0}")]
    ScenarioError(String),
}

impl From<std::io::Error> for BreatheError {
    fn from(e: std::io::Error) -> Self {
        BreatheError::IOError(e.to_string())
    }
}

impl BreatheError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors leave the session running; sound is cosmetic, so
    /// every audio failure falls in this group.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BreatheError::AudioDeviceError(_) => true,
            BreatheError::AudioPlaybackError(_) => true,
            BreatheError::ClockError(_) => false,
            BreatheError::ConfigError(_) => false,
            BreatheError::IOError(_) => false,
            BreatheError::ScenarioError(_) => false,
        }
    }

    /// Get a user-friendly description of the error
    pub fn user_message(&self) -> String {
        match self {
            BreatheError::AudioDeviceError(_) => {
                "No audio output available. The session continues without sound.".to_string()
            }
            BreatheError::AudioPlaybackError(_) => {
                "Ambient sound could not be played. The session continues.".to_string()
            }
            BreatheError::ClockError(_) => {
                "The session timer could not be started. Please restart the application."
                    .to_string()
            }
            BreatheError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            BreatheError::IOError(_) => "File system error occurred.".to_string(),
            BreatheError::ScenarioError(_) => "Scenario could not be run.".to_string(),
        }
    }
}

/// Result type alias for Breathe operations
pub type Result<T> = std::result::Result<T, BreatheError>;
