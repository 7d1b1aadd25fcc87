//! Breathing circle component
//!
//! A translucent circle that slowly grows and shrinks, tinted by phase, with
//! the current instruction in the middle.

use crate::session::Phase;
use crate::ui::theme::Theme;
use crate::ui::view::BREATH_MAX_SCALE;
use egui::{Align2, FontId, Pos2, Sense, Shape, Stroke, Vec2};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Animated breathing circle
pub struct BreathCircle<'a> {
    phase: Phase,
    theme: &'a Theme,
    radius: f32,
    scale: f32,
    progress: f32,
}

impl<'a> BreathCircle<'a> {
    /// Create a circle for the given phase
    pub fn new(phase: Phase, theme: &'a Theme) -> Self {
        Self {
            phase,
            theme,
            radius: 150.0,
            scale: 1.0,
            progress: 0.0,
        }
    }

    /// Set the resting radius
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the animation scale
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale.clamp(0.0, BREATH_MAX_SCALE);
        self
    }

    /// Elapsed share of the phase, traced clockwise from the top
    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress.clamp(0.0, 1.0);
        self
    }

    /// Show the circle and return the response
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        // Reserve room for the largest scale so the layout does not jump
        let side = 2.0 * self.radius * BREATH_MAX_SCALE;
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = rect.center();
            let radius = self.radius * self.scale;

            painter.circle_filled(center, radius, self.theme.circle_fill(self.phase.is_inhale()));
            painter.circle_stroke(center, radius, Stroke::new(2.0, self.theme.circle_stroke));
            if self.progress > 0.0 {
                let arc = progress_arc(center, radius + 6.0, self.progress);
                painter.add(Shape::line(arc, Stroke::new(3.0, self.theme.accent)));
            }
            painter.text(
                center,
                Align2::CENTER_CENTER,
                self.phase.prompt(),
                FontId::proportional(36.0),
                self.theme.text_primary,
            );
        }

        let prompt = self.phase.prompt();
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Label, true, prompt));
        response
    }
}

/// Points along a clockwise arc starting at twelve o'clock
fn progress_arc(center: Pos2, radius: f32, progress: f32) -> Vec<Pos2> {
    let segments = ((64.0 * progress).ceil() as usize).max(1);
    (0..=segments)
        .map(|i| {
            let angle = TAU * progress * i as f32 / segments as f32 - FRAC_PI_2;
            center + radius * Vec2::angled(angle)
        })
        .collect()
}
