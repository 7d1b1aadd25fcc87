//! Breathe - guided breathing session
//!
//! Usage:
//!   breathe                      run with `$BREATHE_CONFIG` or the user config
//!   breathe <config.toml>        run with the given config file
//!   breathe --scenario <file>    run a scripted scenario headless and exit

use anyhow::{bail, Context};
use breathe::testconfig::{ScenarioConfig, ScenarioRunner};
use breathe::ui::BreatheApp;
use breathe::BreatheConfig;
use eframe::egui;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breathe=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [flag, path] if flag == "--scenario" => run_scenario(path),
        [flag] if flag == "--scenario" => bail!("--scenario needs a file argument"),
        [path] => {
            let config = BreatheConfig::load(path)
                .with_context(|| format!("Failed to load config '{}'", path))?;
            run_gui(config)
        }
        [] => run_gui(BreatheConfig::load_or_default()?),
        _ => bail!("Usage: breathe [config.toml | --scenario <file>]"),
    }
}

fn run_scenario(path: &str) -> anyhow::Result<ExitCode> {
    let config = ScenarioConfig::load(path)?;
    let report = ScenarioRunner::new(config).run()?;

    println!("{}", report.summary());
    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_gui(config: BreatheConfig) -> anyhow::Result<ExitCode> {
    info!(
        "Starting Breathe: {} cycles of {}s phases",
        config.session.cycles, config.session.phase_seconds
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_min_inner_size([320.0, 480.0])
            .with_title(config.ui.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        "Breathe",
        options,
        Box::new(|cc| Ok(Box::new(BreatheApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(ExitCode::SUCCESS)
}
