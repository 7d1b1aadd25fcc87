//! Scenario runner
//!
//! Executes a [`ScenarioConfig`] against a session on a manual clock and a
//! silent ambient player.

use super::{ActionType, Assertion, ScenarioConfig};
use crate::audio::{AmbientSound, AudioPresence, SilentPlayer};
use crate::clock::{ManualClock, ManualTicker};
use crate::controller::SessionController;
use crate::error::Result;
use crate::session::SessionState;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Result of an assertion check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    /// Assertion passed
    Passed,
    /// Assertion failed with reason
    Failed(String),
}

/// Observable state an assertion is checked against
#[derive(Debug, Clone, Copy)]
pub struct AssertionContext {
    pub state: SessionState,
    pub is_running: bool,
    pub sound_enabled: bool,
    pub is_playing: bool,
}

impl AssertionContext {
    /// Check an assertion against this context
    pub fn check(&self, assertion: &Assertion) -> AssertionResult {
        let failures = match assertion {
            Assertion::State {
                phase,
                seconds_remaining,
                cycles_remaining,
            } => {
                let mut failures = Vec::new();
                if let Some(phase) = phase {
                    if *phase != self.state.phase {
                        failures.push(format!("phase {} != expected {}", self.state.phase, phase));
                    }
                }
                if let Some(seconds) = seconds_remaining {
                    if *seconds != self.state.seconds_remaining {
                        failures.push(format!(
                            "seconds_remaining {} != expected {}",
                            self.state.seconds_remaining, seconds
                        ));
                    }
                }
                if let Some(cycles) = cycles_remaining {
                    if *cycles != self.state.cycles_remaining {
                        failures.push(format!(
                            "cycles_remaining {} != expected {}",
                            self.state.cycles_remaining, cycles
                        ));
                    }
                }
                failures
            }
            Assertion::IsComplete if !self.state.is_complete() => vec![format!(
                "expected a complete session, {} cycles left",
                self.state.cycles_remaining
            )],
            Assertion::IsRunning if !self.is_running => {
                vec!["expected session to be running".to_string()]
            }
            Assertion::IsStopped if self.is_running => {
                vec!["expected session to be stopped".to_string()]
            }
            Assertion::SoundEnabled { enabled } if *enabled != self.sound_enabled => {
                vec![format!("sound_enabled is {}", self.sound_enabled)]
            }
            Assertion::Playing { playing } if *playing != self.is_playing => {
                vec![format!("playing is {}", self.is_playing)]
            }
            _ => Vec::new(),
        };

        if failures.is_empty() {
            AssertionResult::Passed
        } else {
            AssertionResult::Failed(failures.join("; "))
        }
    }
}

/// Outcome of a scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub steps_executed: usize,
    pub failures: Vec<String>,
    pub final_state: SessionState,
    pub elapsed: Duration,
}

impl ScenarioReport {
    /// Check if every assertion passed
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        let status = if self.passed() { "PASSED" } else { "FAILED" };
        format!(
            "[SCENARIO] '{}' {}: executed {} steps in {:?}",
            self.name, status, self.steps_executed, self.elapsed
        )
    }
}

/// Runs a scenario step by step
pub struct ScenarioRunner {
    config: ScenarioConfig,
    controller: SessionController<ManualClock>,
    ticker: ManualTicker,
    ambient: AmbientSound,
}

impl ScenarioRunner {
    /// Prepare a fresh session for the scenario
    pub fn new(config: ScenarioConfig) -> Self {
        info!("[SCENARIO] Loaded: {}", config.scenario.name);
        if !config.scenario.description.is_empty() {
            info!("[SCENARIO] Description: {}", config.scenario.description);
        }

        let clock = ManualClock::new();
        let ticker = clock.ticker();
        let controller = SessionController::new(config.session.params(), clock);
        let presence = AudioPresence::new(config.session.sound_enabled);
        let ambient = AmbientSound::new(Box::new(SilentPlayer::new()), presence);

        Self {
            config,
            controller,
            ticker,
            ambient,
        }
    }

    /// Controller under test
    pub fn controller(&self) -> &SessionController<ManualClock> {
        &self.controller
    }

    /// Ambient sound under test
    pub fn ambient(&self) -> &AmbientSound {
        &self.ambient
    }

    /// Current observable state
    pub fn context(&self) -> AssertionContext {
        AssertionContext {
            state: self.controller.snapshot(),
            is_running: self.controller.is_running(),
            sound_enabled: self.ambient.sound_enabled(),
            is_playing: self.ambient.is_playing(),
        }
    }

    /// Execute every step and collect assertion failures
    ///
    /// # Errors
    /// Returns an error only if the session cannot be started; failed
    /// assertions are reported in the [`ScenarioReport`].
    pub fn run(&mut self) -> Result<ScenarioReport> {
        let started = Instant::now();
        let mut failures = Vec::new();
        let steps = self.config.steps.clone();

        for (index, step) in steps.iter().enumerate() {
            debug!("[SCENARIO] Step {}: {:?}", index + 1, step.action);
            self.apply(&step.action)?;

            if let Some(assertion) = &step.assert {
                match self.context().check(assertion) {
                    AssertionResult::Passed => {
                        info!("[SCENARIO] PASS: step {} {:?}", index + 1, assertion);
                    }
                    AssertionResult::Failed(reason) => {
                        error!("[SCENARIO] FAIL: step {} {:?} - {}", index + 1, assertion, reason);
                        failures.push(format!("step {}: {}", index + 1, reason));
                    }
                }
            }
        }

        let report = ScenarioReport {
            name: self.config.scenario.name.clone(),
            steps_executed: steps.len(),
            failures,
            final_state: self.controller.snapshot(),
            elapsed: started.elapsed(),
        };
        info!("{}", report.summary());
        Ok(report)
    }

    fn apply(&mut self, action: &ActionType) -> Result<()> {
        match action {
            ActionType::Start => {
                self.controller.start()?;
            }
            ActionType::Stop => self.controller.stop(),
            ActionType::Reset => self.controller.reset()?,
            ActionType::Tick { count } => {
                let delivered = self.ticker.tick_n(*count);
                if delivered < *count {
                    debug!("[SCENARIO] Clock disarmed after {} of {} ticks", delivered, count);
                }
            }
            ActionType::InjectTick { count } => {
                for _ in 0..*count {
                    self.controller.on_tick();
                }
            }
            ActionType::ToggleSound => {
                self.ambient.toggle_sound();
            }
            ActionType::Focus { focused } => self.ambient.set_focused(*focused),
            ActionType::Log { message } => info!("[SCENARIO] Log: {}", message),
        }
        Ok(())
    }
}
