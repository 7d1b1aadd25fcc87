//! Scripted session scenarios
//!
//! A scenario is a TOML file listing lifecycle actions (start, ticks, mute,
//! focus changes) to apply to a session driven by a manual clock, each with
//! an optional assertion on the resulting state. Scenarios run headless and
//! deterministically, so they double as regression fixtures.

mod runner;

pub use runner::{AssertionContext, AssertionResult, ScenarioReport, ScenarioRunner};

use crate::error::{BreatheError, Result};
use crate::session::{Phase, SessionParams};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A scenario loaded from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario metadata
    pub scenario: ScenarioMetadata,
    /// Session the steps run against
    #[serde(default)]
    pub session: ScenarioSession,
    /// Steps executed in order
    pub steps: Vec<ScenarioStep>,
}

/// Metadata about the scenario
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioMetadata {
    /// Name of the scenario
    pub name: String,
    /// What the scenario checks
    #[serde(default)]
    pub description: String,
}

/// Session parameters for a scenario
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioSession {
    pub phase_seconds: u32,
    pub cycles: u32,
    pub sound_enabled: bool,
}

impl Default for ScenarioSession {
    fn default() -> Self {
        Self {
            phase_seconds: 10,
            cycles: 10,
            sound_enabled: true,
        }
    }
}

impl ScenarioSession {
    /// Parameters for the session controller
    pub fn params(&self) -> SessionParams {
        SessionParams::new(self.phase_seconds, self.cycles)
    }
}

/// One action plus an optional check
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioStep {
    /// The action to perform
    pub action: ActionType,
    /// Optional assertion to validate after the action
    #[serde(default)]
    pub assert: Option<Assertion>,
}

fn one() -> u64 {
    1
}

/// Actions a scenario can perform
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionType {
    /// Start (or restart) the session
    Start,
    /// Stop the session
    Stop,
    /// Reset the session to its initial state
    Reset,
    /// Fire the session clock `count` times
    Tick {
        #[serde(default = "one")]
        count: u64,
    },
    /// Call the tick handler directly, bypassing the clock
    InjectTick {
        #[serde(default = "one")]
        count: u64,
    },
    /// Flip the mute toggle
    ToggleSound,
    /// Session view gained or lost focus
    Focus { focused: bool },
    /// Log a message
    Log { message: String },
}

/// Assertions checked after a step
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Compare the snapshot; omitted fields are not checked
    State {
        #[serde(default)]
        phase: Option<Phase>,
        #[serde(default)]
        seconds_remaining: Option<u32>,
        #[serde(default)]
        cycles_remaining: Option<u32>,
    },
    /// Session has no cycles left
    IsComplete,
    /// The clock is driving the session
    IsRunning,
    /// The clock is not driving the session
    IsStopped,
    /// Mute toggle position
    SoundEnabled { enabled: bool },
    /// Whether ambient sound is audible
    Playing { playing: bool },
}

impl ScenarioConfig {
    /// Parse and validate scenario text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(content)
            .map_err(|e| BreatheError::ScenarioError(format!("Invalid scenario: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a scenario file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BreatheError::ScenarioError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(BreatheError::ScenarioError(
                "Scenario must have at least one step".to_string(),
            ));
        }
        if self.session.phase_seconds == 0 {
            return Err(BreatheError::ScenarioError(
                "session.phase_seconds must be at least 1".to_string(),
            ));
        }
        for (index, step) in self.steps.iter().enumerate() {
            if let ActionType::Tick { count: 0 } | ActionType::InjectTick { count: 0 } =
                step.action
            {
                return Err(BreatheError::ScenarioError(format!(
                    "Step {} ticks zero times",
                    index + 1
                )));
            }
        }
        Ok(())
    }
}
