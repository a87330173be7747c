use eframe::egui::{self, CornerRadius, Frame, Margin, RichText};

use super::EguiApp;
use super::style;
use crate::egui_app::view_model;
use crate::showcase::{LANDING_STATS, LandingStat};

impl EguiApp {
    pub(super) fn render_landing(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("landing")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .stroke(style::card_stroke())
                    .inner_margin(Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new("Factory Quality Control")
                                .size(24.0)
                                .strong()
                                .color(palette.accent_violet),
                        );
                        ui.label(
                            RichText::new(
                                "AI-powered defect detection and sensor anomaly monitoring",
                            )
                            .color(palette.text_muted),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.render_clock(ui);
                    });
                });
                ui.add_space(8.0);
                ui.columns(LANDING_STATS.len(), |columns| {
                    for (column, stat) in columns.iter_mut().zip(LANDING_STATS.iter()) {
                        stat_card(column, stat);
                    }
                });
            });
    }

    fn render_clock(&self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let Some(now) = self.controller.ui.landing.clock.now else {
            return;
        };
        ui.vertical(|ui| {
            ui.label(
                RichText::new(view_model::clock_time(now))
                    .monospace()
                    .size(20.0)
                    .color(palette.text_primary),
            );
            ui.label(RichText::new(view_model::clock_date(now)).color(palette.text_muted));
        });
    }
}

fn stat_card(ui: &mut egui::Ui, stat: &LandingStat) {
    let palette = style::palette();
    Frame::new()
        .fill(style::card_fill())
        .stroke(style::card_stroke())
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(stat.value)
                    .size(22.0)
                    .strong()
                    .color(palette.accent_pink),
            );
            ui.label(RichText::new(stat.label).color(palette.text_primary));
            ui.label(RichText::new(stat.detail).small().color(palette.text_muted));
        });
}
