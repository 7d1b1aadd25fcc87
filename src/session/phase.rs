//! Breathing phase

use serde::Deserialize;

/// Current breathing direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Breathing in
    #[default]
    Inhale,
    /// Breathing out
    Exhale,
}

impl Phase {
    /// The other phase
    pub fn flipped(self) -> Self {
        match self {
            Phase::Inhale => Phase::Exhale,
            Phase::Exhale => Phase::Inhale,
        }
    }

    /// Check if breathing in
    pub fn is_inhale(&self) -> bool {
        matches!(self, Phase::Inhale)
    }

    /// Check if breathing out
    pub fn is_exhale(&self) -> bool {
        matches!(self, Phase::Exhale)
    }

    /// Instruction shown inside the breathing circle
    pub fn prompt(&self) -> &'static str {
        match self {
            Phase::Inhale => "Breathe In",
            Phase::Exhale => "Breathe Out",
        }
    }

    /// Status line shown under the countdown
    pub fn status_line(&self) -> &'static str {
        match self {
            Phase::Inhale => "Inhaling...",
            Phase::Exhale => "Exhaling...",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Inhale => write!(f, "Inhale"),
            Phase::Exhale => write!(f, "Exhale"),
        }
    }
}
