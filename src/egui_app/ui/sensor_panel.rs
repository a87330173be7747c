use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Stroke};

use super::EguiApp;
use super::history_chart;
use super::style;
use crate::egui_app::view_model;
use crate::inference::AnomalyResult;
use crate::sensors::{SensorField, SensorHistory};

impl EguiApp {
    pub(super) fn render_sensor_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new("Sensor Anomaly Detection")
                .size(18.0)
                .strong()
                .color(palette.text_primary),
        );
        ui.label(
            RichText::new("Enter live machine readings to check for abnormal behaviour")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);
        self.render_sensor_fields(ui);
        ui.add_space(8.0);
        self.render_sensor_actions(ui);

        let state = &self.controller.ui.sensor;
        if let Some(error) = state.error.as_deref() {
            ui.add_space(6.0);
            ui.label(RichText::new(error).color(palette.danger));
        }
        if let Some(result) = state.result.as_ref() {
            ui.add_space(8.0);
            anomaly_card(ui, result);
        }
        ui.add_space(12.0);
        history_section(ui, &state.history);
    }

    fn render_sensor_fields(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let mut edits = Vec::new();
        egui::Grid::new("sensor_fields")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for field in SensorField::ALL {
                    ui.label(RichText::new(field.label()).color(palette.text_primary));
                    let mut text = self.controller.ui.sensor.field_text(field).to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut text)
                            .desired_width(140.0)
                            .hint_text("0.0"),
                    );
                    if response.changed() {
                        edits.push((field, text));
                    }
                    ui.end_row();
                }
            });
        for (field, text) in edits {
            self.controller.set_sensor_field(field, text);
        }
    }

    fn render_sensor_actions(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let state = &self.controller.ui.sensor;
        let loading = state.loading;
        let has_content = state.result.is_some() || !state.history.is_empty();
        ui.horizontal(|ui| {
            let analyze = ui.add_enabled(
                !loading,
                egui::Button::new(RichText::new("Analyze readings").strong()),
            );
            if analyze.clicked() {
                self.controller.analyze_sensor();
            }
            if loading {
                ui.add(egui::Spinner::new());
                ui.label(RichText::new("Analyzing...").color(palette.text_muted));
            }
            if ui.add_enabled(has_content, egui::Button::new("Reset")).clicked() {
                self.controller.reset_sensor();
            }
        });
    }
}

fn anomaly_card(ui: &mut egui::Ui, result: &AnomalyResult) {
    let palette = style::palette();
    let color = style::verdict_color(!result.anomaly);
    Frame::new()
        .fill(color.gamma_multiply(0.15))
        .stroke(Stroke::new(1.0, color))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(view_model::anomaly_headline(result))
                    .size(18.0)
                    .strong()
                    .color(color),
            );
            ui.label(
                RichText::new(format!(
                    "Reconstruction error: {}",
                    view_model::reconstruction_error(result.reconstruction_error)
                ))
                .monospace()
                .color(palette.text_primary),
            );
        });
}

fn history_section(ui: &mut egui::Ui, history: &SensorHistory) {
    let palette = style::palette();
    ui.label(
        RichText::new("Recent readings")
            .strong()
            .color(palette.text_primary),
    );
    ui.label(
        RichText::new(view_model::history_summary(&history.summary()))
            .small()
            .color(palette.text_muted),
    );
    if history.is_empty() {
        return;
    }
    ui.add_space(6.0);
    history_chart::render(ui, history);
    ui.add_space(6.0);
    egui::Grid::new("sensor_history_table")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for heading in ["Time", "Vibration", "Temperature", "Pressure", "Status"] {
                ui.label(RichText::new(heading).strong().color(palette.text_muted));
            }
            ui.end_row();
            for reading in history.iter().rev() {
                ui.label(RichText::new(&reading.timestamp).monospace());
                ui.label(view_model::vibration_reading(reading.vibration));
                ui.label(view_model::temperature_reading(reading.temperature));
                ui.label(view_model::pressure_reading(reading.pressure));
                let (text, color) = if reading.anomaly {
                    ("Anomaly", palette.danger)
                } else {
                    ("Normal", palette.success)
                };
                ui.label(RichText::new(text).color(color));
                ui.end_row();
            }
        });
}
