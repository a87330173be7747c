use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Stroke};

use super::EguiApp;
use super::style;
use crate::egui_app::view_model;
use crate::inference::PredictionResult;

const PREVIEW_MAX_HEIGHT: f32 = 320.0;

impl EguiApp {
    pub(super) fn render_image_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new("Image Quality Analysis")
                .size(18.0)
                .strong()
                .color(palette.text_primary),
        );
        ui.label(
            RichText::new("Upload a product photo to classify it as good or defective")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);
        self.render_drop_zone(ui);
        ui.add_space(8.0);
        self.render_image_actions(ui);

        let state = &self.controller.ui.image;
        if let Some(error) = state.error.as_deref() {
            ui.add_space(6.0);
            ui.label(RichText::new(error).color(palette.danger));
        }
        if let Some(prediction) = state.prediction.as_ref() {
            ui.add_space(8.0);
            prediction_card(ui, prediction);
        }
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let preview_tex = self.preview_tex.as_ref().map(|(_, tex)| tex.clone());
        let state = &self.controller.ui.image;
        let stroke = if state.drop_hovered {
            Stroke::new(2.0, palette.accent_pink)
        } else {
            style::card_stroke()
        };
        let mut choose_clicked = false;
        Frame::new()
            .fill(style::card_fill())
            .stroke(stroke)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(Margin::same(16))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    match (preview_tex.as_ref(), state.preview.as_ref()) {
                        (Some(tex), Some(preview)) => {
                            let size = tex.size_vec2();
                            let scale = (PREVIEW_MAX_HEIGHT / size.y).min(1.0);
                            ui.add(egui::Image::new(tex).fit_to_exact_size(size * scale));
                            ui.label(
                                RichText::new(format!(
                                    "{} x {} px, {}",
                                    preview.source_size[0], preview.source_size[1], preview.mime
                                ))
                                .small()
                                .color(palette.text_muted),
                            );
                        }
                        _ if state.preview_loading => {
                            ui.add(egui::Spinner::new());
                            ui.label(RichText::new("Loading preview...").color(palette.text_muted));
                        }
                        _ => {
                            let hint = if state.drop_hovered {
                                "Release to load the image"
                            } else {
                                "Drag and drop an image here"
                            };
                            ui.label(RichText::new(hint).color(palette.text_muted));
                        }
                    }
                    if let Some(error) = state.preview_error.as_deref() {
                        ui.label(RichText::new(error).small().color(palette.warning));
                    }
                    if let Some(file) = state.file.as_ref() {
                        ui.label(RichText::new(&file.name).color(palette.text_primary));
                    }
                    ui.add_space(4.0);
                    choose_clicked = ui.button("Choose image...").clicked();
                });
            });
        if choose_clicked {
            self.controller.pick_image_via_dialog();
        }
    }

    fn render_image_actions(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let state = &self.controller.ui.image;
        let can_analyze = state.file.is_some() && !state.loading;
        let loading = state.loading;
        let has_content = state.file.is_some() || state.prediction.is_some();
        ui.horizontal(|ui| {
            let analyze = ui.add_enabled(
                can_analyze,
                egui::Button::new(RichText::new("Analyze image").strong()),
            );
            if analyze.clicked() {
                self.controller.analyze_image();
            }
            if loading {
                ui.add(egui::Spinner::new());
                ui.label(RichText::new("Analyzing...").color(palette.text_muted));
            }
            if ui.add_enabled(has_content, egui::Button::new("Reset")).clicked() {
                self.controller.reset_image();
            }
        });
    }
}

fn prediction_card(ui: &mut egui::Ui, prediction: &PredictionResult) {
    let palette = style::palette();
    let color = style::verdict_color(prediction.label.is_good());
    Frame::new()
        .fill(color.gamma_multiply(0.15))
        .stroke(Stroke::new(1.0, color))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(view_model::quality_headline(prediction))
                    .size(18.0)
                    .strong()
                    .color(color),
            );
            ui.label(
                RichText::new(format!("Label: {}", prediction.label)).color(palette.text_primary),
            );
            ui.add(
                egui::ProgressBar::new(prediction.confidence as f32)
                    .fill(color)
                    .text(format!(
                        "Confidence {}",
                        view_model::confidence_percent(prediction.confidence)
                    )),
            );
        });
}
