use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

use super::EguiApp;
use super::style;

impl EguiApp {
    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::card_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::card_stroke(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.menu_button("Log", |ui| {
                            egui::ScrollArea::vertical()
                                .id_salt("status_log_scroll")
                                .max_height(240.0)
                                .stick_to_bottom(true)
                                .show(ui, |ui| {
                                    ui.label(
                                        RichText::new(status.log_text())
                                            .monospace()
                                            .color(palette.text_muted),
                                    );
                                });
                        });
                        let api = &self.controller.config().api;
                        ui.label(RichText::new(&api.base_url).small().color(palette.text_muted))
                            .on_hover_text(format!(
                                "Image endpoint: {}\nSensor endpoint: {}",
                                api.image_endpoint(),
                                api.sensor_endpoint()
                            ));
                    });
                });
            });
    }
}
