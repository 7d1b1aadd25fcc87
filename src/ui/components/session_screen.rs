//! Full session screen
//!
//! Header with title and sound toggle, countdown, breathing circle, cycle
//! counter and quote. Stateless: the caller owns the session and decides
//! what a click on the sound toggle does.

use super::{BreathCircle, CycleCounter, SoundToggle};
use crate::ui::theme::Theme;
use crate::ui::view::SessionView;
use egui::{Align, Layout, RichText};

/// Interactions on the session screen this frame
pub struct ScreenResponse {
    pub sound_toggle: egui::Response,
}

impl ScreenResponse {
    /// Check if the mute toggle was clicked
    pub fn sound_toggled(&self) -> bool {
        self.sound_toggle.clicked()
    }
}

pub struct SessionScreen<'a> {
    view: &'a SessionView,
    theme: &'a Theme,
    title: &'a str,
    quote: &'a str,
    sound_enabled: bool,
    scale: f32,
}

impl<'a> SessionScreen<'a> {
    pub fn new(view: &'a SessionView, theme: &'a Theme) -> Self {
        Self {
            view,
            theme,
            title: "Mindful Breathing",
            quote: "Breathe in peace, breathe out tension",
            sound_enabled: true,
            scale: 1.0,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn quote(mut self, quote: &'a str) -> Self {
        self.quote = quote;
        self
    }

    pub fn sound_enabled(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Breathing circle scale for this frame
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> ScreenResponse {
        let theme = self.theme;

        let sound_toggle = ui
            .horizontal(|ui| {
                ui.label(
                    RichText::new(self.title)
                        .size(24.0)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    SoundToggle::new(self.sound_enabled, theme).show(ui)
                })
                .inner
            })
            .inner;

        ui.add_space(theme.spacing_lg);

        ui.vertical_centered(|ui| {
            let timer = ui.label(
                RichText::new(&self.view.timer_text)
                    .size(36.0)
                    .strong()
                    .color(theme.text_primary),
            );
            let timer_text = format!("Seconds remaining: {}", self.view.timer_text);
            timer.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &timer_text));

            ui.label(
                RichText::new(self.view.status_line)
                    .size(18.0)
                    .color(theme.text_secondary),
            );

            ui.add_space(theme.spacing);
            BreathCircle::new(self.view.phase, theme)
                .radius(120.0)
                .scale(self.scale)
                .progress(self.view.phase_progress)
                .show(ui);
            ui.add_space(theme.spacing);

            CycleCounter::new(self.view, theme).show(ui);

            if self.view.show_quote {
                ui.add_space(theme.spacing_sm);
                ui.label(
                    RichText::new(format!("\"{}\"", self.quote))
                        .size(16.0)
                        .italics()
                        .color(theme.text_muted),
                );
            }
        });

        ScreenResponse { sound_toggle }
    }
}
