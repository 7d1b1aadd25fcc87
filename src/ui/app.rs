//! Main Breathe application struct and eframe integration

use crate::audio::{self, AmbientSound, AudioPresence};
use crate::clock::IntervalClock;
use crate::config::BreatheConfig;
use crate::controller::{SessionController, SessionEvent};
use crate::error::BreatheError;
use crate::ui::components::SessionScreen;
use crate::ui::theme::Theme;
use crate::ui::view::{breath_scale, SessionView};
use crossbeam_channel::Receiver;
use egui::{CentralPanel, Color32, Key, Mesh, Rect, RichText, Shape};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Main Breathe application
pub struct BreatheApp {
    /// Whether the session has been started
    initialized: bool,
    config: BreatheConfig,
    theme: Theme,
    controller: SessionController<IntervalClock>,
    events: Receiver<SessionEvent>,
    ambient: AmbientSound,
    /// Shown under the screen when the timer could not be armed
    status: Option<String>,
}

impl BreatheApp {
    /// Create a new Breathe application
    pub fn new(cc: &eframe::CreationContext<'_>, config: BreatheConfig) -> Self {
        let theme = Theme::for_preference(config.ui.light_theme);
        theme.apply(&cc.egui_ctx);

        let clock = IntervalClock::new(config.tick_interval());
        info!("Phase clock ticks every {:?}", clock.interval());
        let controller = SessionController::new(config.session_params(), clock);
        let events = controller.events();

        // Every tick must reach the screen even when no input arrives
        let repaint_ctx = cc.egui_ctx.clone();
        controller.subscribe(Arc::new(move |_: &SessionEvent| repaint_ctx.request_repaint()));

        let presence = AudioPresence::new(config.audio.sound_enabled);
        let ambient = AmbientSound::new(audio::open_player(&config.audio), presence);

        Self {
            initialized: false,
            config,
            theme,
            controller,
            events,
            ambient,
            status: None,
        }
    }

    /// Start the session on the first frame
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.start_session();
        info!("Breathe UI initialized");
    }

    fn start_session(&mut self) {
        match self.controller.start() {
            Ok(_) => self.status = None,
            Err(e) => self.report("start", e),
        }
    }

    /// Log a lifecycle failure and surface it under the screen
    fn report(&mut self, action: &str, e: BreatheError) {
        if e.is_recoverable() {
            warn!("Failed to {} session: {}", action, e);
        } else {
            error!("Failed to {} session: {}", action, e);
        }
        self.status = Some(e.user_message());
    }

    /// Drain session events for logging
    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let SessionEvent::Completed { run, finished_at, .. } = event {
                let elapsed = finished_at - run.started_at;
                info!(
                    "Session {} finished after {}s",
                    run.id,
                    elapsed.num_seconds()
                );
            }
        }
    }

    /// Keyboard shortcuts: Space start/stop, R reset, M mute
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (space, reset, mute) = ctx.input(|i| {
            (
                i.key_pressed(Key::Space),
                i.key_pressed(Key::R),
                i.key_pressed(Key::M),
            )
        });

        if space {
            if self.controller.is_running() {
                self.controller.stop();
            } else {
                self.start_session();
            }
        }
        if reset {
            if let Err(e) = self.controller.reset() {
                self.report("reset", e);
            }
        }
        if mute {
            self.ambient.toggle_sound();
        }
    }
}

impl eframe::App for BreatheApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.initialize();
        self.process_events();

        let focused = ctx.input(|i| i.focused);
        self.ambient.set_focused(focused);
        self.ambient.pump();

        self.handle_keys(ctx);

        let view = SessionView::from_state(&self.controller.snapshot(), &self.controller.params());
        let scale = breath_scale(ctx.input(|i| i.time));

        CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(self.theme.spacing_lg))
            .show(ctx, |ui| {
                paint_gradient(ui, ui.max_rect(), self.theme.gradient_top, self.theme.gradient_bottom);

                let response = SessionScreen::new(&view, &self.theme)
                    .title(&self.config.ui.title)
                    .quote(&self.config.ui.quote)
                    .sound_enabled(self.ambient.sound_enabled())
                    .scale(scale)
                    .show(ui);

                if response.sound_toggled() {
                    self.ambient.toggle_sound();
                }

                ui.add_space(self.theme.spacing);
                ui.vertical_centered(|ui| {
                    if let Some(status) = &self.status {
                        ui.label(RichText::new(status).size(12.0).color(self.theme.text_muted));
                    }
                    ui.label(
                        RichText::new("Space: start/stop   R: reset   M: mute")
                            .size(12.0)
                            .color(self.theme.text_muted.gamma_multiply(0.7)),
                    );
                });
            });

        // The breathing circle animates continuously
        ctx.request_repaint();
    }
}

impl Drop for BreatheApp {
    fn drop(&mut self) {
        self.controller.stop();
        self.ambient.set_focused(false);
    }
}

/// Fill `rect` with a vertical two-color gradient
fn paint_gradient(ui: &egui::Ui, rect: Rect, top: Color32, bottom: Color32) {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    ui.painter().add(Shape::mesh(mesh));
}
