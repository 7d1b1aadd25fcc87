//! Mute/unmute button

use crate::ui::theme::Theme;
use egui::{RichText, Vec2};

/// Speaker icon button that reflects the mute state
///
/// The caller applies the toggle when the returned response is clicked.
pub struct SoundToggle<'a> {
    enabled: bool,
    theme: &'a Theme,
}

impl<'a> SoundToggle<'a> {
    pub fn new(enabled: bool, theme: &'a Theme) -> Self {
        Self { enabled, theme }
    }

    /// Accessible label describing what a click does
    pub fn label(enabled: bool) -> &'static str {
        if enabled {
            "Mute sound"
        } else {
            "Unmute sound"
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let icon = if self.enabled { "🔉" } else { "🔇" };
        let button = egui::Button::new(RichText::new(icon).size(24.0).color(self.theme.text_primary))
            .frame(false)
            .rounding(self.theme.button_rounding)
            .min_size(Vec2::splat(40.0));

        let response = ui.add(button);
        let label = Self::label(self.enabled);
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, true, label));
        response.on_hover_text(label)
    }
}
