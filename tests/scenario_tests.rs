//! Scenario files shipped in `scenarios/`
//!
//! Each file is loaded from disk and run headless; a failing assertion in
//! any of them fails the test with the runner's summary.

use breathe::testconfig::{ScenarioConfig, ScenarioRunner};
use breathe::Phase;
use std::path::PathBuf;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn run_scenario(name: &str) -> ScenarioRunner {
    let config = ScenarioConfig::load(scenario_path(name)).expect("scenario should load");
    let mut runner = ScenarioRunner::new(config);
    let report = runner.run().expect("scenario should run");
    assert!(report.passed(), "{}", report.summary());
    runner
}

#[test]
fn test_reference_timeline() {
    let runner = run_scenario("reference_timeline.toml");
    let state = runner.controller().snapshot();
    assert!(state.is_complete());
    assert_eq!(state.phase, Phase::Inhale);
}

#[test]
fn test_stop_and_restart() {
    let runner = run_scenario("stop_and_restart.toml");
    assert!(!runner.controller().is_running());
}

#[test]
fn test_ambient_sound() {
    let runner = run_scenario("ambient_sound.toml");
    assert!(runner.controller().is_running());
    assert!(runner.ambient().sound_enabled());
    assert!(!runner.ambient().is_focused());
}

#[test]
fn test_all_shipped_scenarios_pass() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    let mut count = 0;

    for entry in std::fs::read_dir(&dir).expect("scenarios dir") {
        let path = entry.expect("dir entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let config = ScenarioConfig::load(&path)
            .unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        let report = ScenarioRunner::new(config).run().expect("scenario should run");
        assert!(report.passed(), "{}: {}", path.display(), report.summary());
        count += 1;
    }

    assert!(count >= 3, "expected the shipped scenarios, found {}", count);
}

#[test]
fn test_failing_assertion_is_reported() {
    let config = ScenarioConfig::from_toml(
        r#"
        [scenario]
        name = "Wrong expectation"

        [session]
        phase_seconds = 4
        cycles = 1

        [[steps]]
        action = { type = "start" }

        [[steps]]
        action = { type = "tick", count = 4 }
        assert = { type = "state", phase = "inhale" }
        "#,
    )
    .unwrap();

    let report = ScenarioRunner::new(config).run().unwrap();
    assert!(!report.passed());
    assert_eq!(report.failures.len(), 1);
    assert!(report.summary().contains("FAILED"));
}
