//! Theme and styling for the Breathe UI

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Top of the background gradient
    pub gradient_top: Color32,
    /// Bottom of the background gradient
    pub gradient_bottom: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Breathing circle fill while inhaling
    pub circle_inhale: Color32,
    /// Breathing circle fill while exhaling
    pub circle_exhale: Color32,
    /// Breathing circle outline
    pub circle_stroke: Color32,

    /// Accent used for hover and focus
    pub accent: Color32,
    /// Completion message color
    pub success: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Violet gradient with white text
    pub fn dark() -> Self {
        Self {
            gradient_top: Color32::from_rgb(138, 43, 226),  // Blue violet
            gradient_bottom: Color32::from_rgb(75, 0, 130), // Indigo

            text_primary: Color32::WHITE,
            text_secondary: Color32::from_white_alpha(230),
            text_muted: Color32::from_white_alpha(204),

            circle_inhale: Color32::from_white_alpha(77),
            circle_exhale: Color32::from_black_alpha(51),
            circle_stroke: Color32::from_white_alpha(128),

            accent: Color32::from_rgb(216, 180, 254), // Lavender
            success: Color32::from_rgb(187, 247, 208),

            button_rounding: Rounding::same(8.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Pale lavender gradient with dark text
    pub fn light() -> Self {
        Self {
            gradient_top: Color32::from_rgb(237, 233, 254),
            gradient_bottom: Color32::from_rgb(196, 181, 253),

            text_primary: Color32::from_rgb(46, 16, 101),
            text_secondary: Color32::from_rgb(76, 29, 149),
            text_muted: Color32::from_rgb(109, 40, 217),

            circle_inhale: Color32::from_white_alpha(160),
            circle_exhale: Color32::from_black_alpha(30),
            circle_stroke: Color32::from_rgb(139, 92, 246),

            accent: Color32::from_rgb(124, 58, 237),
            success: Color32::from_rgb(22, 163, 74),

            button_rounding: Rounding::same(8.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Pick a theme by preference
    pub fn for_preference(light: bool) -> Self {
        if light {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Circle fill for the current phase
    pub fn circle_fill(&self, inhale: bool) -> Color32 {
        if inhale {
            self.circle_inhale
        } else {
            self.circle_exhale
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = self.gradient_bottom;
        visuals.window_fill = self.gradient_bottom;
        visuals.override_text_color = Some(self.text_primary);

        visuals.widgets.inactive.weak_bg_fill = Color32::TRANSPARENT;
        visuals.widgets.inactive.bg_fill = Color32::TRANSPARENT;
        visuals.widgets.hovered.weak_bg_fill = self.accent.gamma_multiply(0.2);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.active.weak_bg_fill = self.accent.gamma_multiply(0.35);

        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.button_padding = Vec2::new(self.spacing_sm, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(24.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(16.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(20.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }
}
