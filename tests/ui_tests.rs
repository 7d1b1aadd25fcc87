//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests render the session screen against a manually clocked
//! session and check the accessibility tree for expected elements.

use breathe::audio::{AmbientSound, AudioPresence, SilentPlayer};
use breathe::ui::{breath_scale, SessionScreen, SessionView, Theme};
use breathe::{ManualClock, ManualTicker, SessionController, SessionParams};
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;

/// Session state wrapper for testing
struct TestApp {
    controller: SessionController<ManualClock>,
    ticker: ManualTicker,
    ambient: AmbientSound,
    theme: Theme,
}

impl TestApp {
    fn new(phase_seconds: u32, cycles: u32) -> Self {
        let clock = ManualClock::new();
        let ticker = clock.ticker();
        let controller = SessionController::new(SessionParams::new(phase_seconds, cycles), clock);
        controller.start().unwrap();

        let mut ambient = AmbientSound::new(Box::new(SilentPlayer::new()), AudioPresence::default());
        ambient.set_focused(true);

        Self {
            controller,
            ticker,
            ambient,
            theme: Theme::dark(),
        }
    }
}

/// Render the session screen the way the app does
fn render_session(app: &mut TestApp, ui: &mut egui::Ui) {
    let view = SessionView::from_state(&app.controller.snapshot(), &app.controller.params());
    let response = SessionScreen::new(&view, &app.theme)
        .sound_enabled(app.ambient.sound_enabled())
        .scale(breath_scale(0.0))
        .show(ui);

    if response.sound_toggled() {
        app.ambient.toggle_sound();
    }
}

fn harness(app: TestApp) -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(420.0, 720.0))
        .build_state(
            |ctx, app: &mut TestApp| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    render_session(app, ui);
                });
            },
            app,
        )
}

#[test]
fn test_initial_screen_elements() {
    let mut harness = harness(TestApp::new(10, 10));
    harness.run();

    let _title = harness.get_by_label("Mindful Breathing");
    let _timer = harness.get_by_label("Seconds remaining: 10s");
    let _status = harness.get_by_label("Inhaling...");
    let _circle = harness.get_by_label("Breathe In");
    let _cycles = harness.get_by_label("10 cycles left");
    let _toggle = harness.get_by_label("Mute sound");
}

#[test]
fn test_timer_follows_ticks() {
    let mut harness = harness(TestApp::new(10, 10));
    harness.run();

    harness.state().ticker.tick_n(3);
    harness.run();

    let _timer = harness.get_by_label("Seconds remaining: 7s");
}

#[test]
fn test_phase_flip_updates_prompt() {
    let mut harness = harness(TestApp::new(2, 3));
    harness.run();

    harness.state().ticker.tick_n(2);
    harness.run();

    let _status = harness.get_by_label("Exhaling...");
    let _circle = harness.get_by_label("Breathe Out");
    assert!(harness.query_by_label("Breathe In").is_none());
}

#[test]
fn test_mute_button_toggles_sound() {
    let mut harness = harness(TestApp::new(10, 10));
    harness.run();
    assert!(harness.state().ambient.is_playing());

    harness.get_by_label("Mute sound").click();
    harness.run();

    assert!(!harness.state().ambient.sound_enabled());
    assert!(!harness.state().ambient.is_playing());
    let _unmute = harness.get_by_label("Unmute sound");

    harness.get_by_label("Unmute sound").click();
    harness.run();

    assert!(harness.state().ambient.sound_enabled());
    assert!(harness.state().ambient.is_playing());
}

#[test]
fn test_mute_does_not_touch_timer() {
    let mut harness = harness(TestApp::new(10, 10));
    harness.run();

    harness.state().ticker.tick_n(4);
    harness.run();
    let before = harness.state().controller.snapshot();

    harness.get_by_label("Mute sound").click();
    harness.run();

    assert_eq!(harness.state().controller.snapshot(), before);
    assert!(harness.state().controller.is_running());
}

#[test]
fn test_single_cycle_left_is_singular() {
    let mut harness = harness(TestApp::new(1, 2));
    harness.run();

    harness.state().ticker.tick_n(2);
    harness.run();

    let _cycles = harness.get_by_label("1 cycle left");
}

#[test]
fn test_completed_session_view() {
    let mut harness = harness(TestApp::new(1, 1));
    harness.run();

    harness.state().ticker.tick_n(2);
    harness.run();

    let _done = harness.get_by_label("Meditation Complete! Great job!");
    let _cycles = harness.get_by_label("0 cycles left");
    assert!(harness
        .query_by_label("\"Breathe in peace, breathe out tension\"")
        .is_none());
    assert!(!harness.state().controller.is_running());
}
