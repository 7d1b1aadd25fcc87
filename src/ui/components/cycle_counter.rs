//! Remaining cycles and completion message

use crate::ui::theme::Theme;
use crate::ui::view::SessionView;
use egui::RichText;

pub struct CycleCounter<'a> {
    view: &'a SessionView,
    theme: &'a Theme,
}

impl<'a> CycleCounter<'a> {
    pub fn new(view: &'a SessionView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let cycles = ui.label(
                RichText::new(&self.view.cycles_text)
                    .size(22.0)
                    .color(self.theme.text_primary),
            );
            let cycles_text = self.view.cycles_text.clone();
            cycles.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &cycles_text)
            });

            if let Some(done) = self.view.completion_text {
                ui.add_space(self.theme.spacing_sm);
                let response = ui.label(RichText::new(done).size(22.0).color(self.theme.success));
                response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Label, true, done));
            }
        });
    }
}
