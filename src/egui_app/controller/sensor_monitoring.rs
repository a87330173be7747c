use tracing::{debug, info, warn};

use super::EguiController;
use super::jobs::SensorAnalysisResult;
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;
use crate::sensors::{SensorField, SensorReading, parse_or_zero};

impl EguiController {
    /// Store the raw text of a field and its parsed value.
    ///
    /// Text that does not parse to a finite number counts as `0`.
    pub fn set_sensor_field(&mut self, field: SensorField, text: impl Into<String>) {
        let text = text.into();
        let state = &mut self.ui.sensor;
        state.input.set(field, parse_or_zero(&text));
        state.field_text[field.index()] = text;
    }

    /// Submit the current readings. No-op while a request is in flight.
    pub fn analyze_sensor(&mut self) {
        let input = self.ui.sensor.input;
        let Some(request_id) = self.jobs.begin_sensor_analysis(input) else {
            debug!("Sensor analysis already in flight");
            return;
        };
        debug!(request_id, ?input, "Started sensor analysis");
        self.ui.sensor.loading = true;
        self.ui.sensor.error = None;
        self.set_status("Analyzing sensor readings...", StatusTone::Busy);
    }

    /// Clear the result, error and history; field values are kept.
    pub fn reset_sensor(&mut self) {
        if self.jobs.sensor.cancel() {
            debug!("Sensor reset discarded a pending request");
        }
        let state = &mut self.ui.sensor;
        state.result = None;
        state.error = None;
        state.loading = false;
        state.history.clear();
        self.set_status("Sensor history cleared", StatusTone::Idle);
    }

    pub(super) fn apply_sensor_analysis(&mut self, message: SensorAnalysisResult) {
        if !self.jobs.sensor.complete(message.request_id) {
            debug!(request_id = message.request_id, "Discarding stale sensor analysis");
            return;
        }
        self.ui.sensor.loading = false;
        match message.result {
            Ok(result) => {
                info!(
                    anomaly = result.anomaly,
                    reconstruction_error = result.reconstruction_error,
                    "Sensor readings analyzed"
                );
                let timestamp = view_model::clock_time(crate::logging::now_local());
                let state = &mut self.ui.sensor;
                state
                    .history
                    .push(SensorReading::new(timestamp, &message.input, &result));
                state.result = Some(result);
                let tone = if result.anomaly {
                    StatusTone::Warning
                } else {
                    StatusTone::Info
                };
                self.set_status(
                    format!(
                        "{} (error {})",
                        view_model::anomaly_headline(&result),
                        view_model::reconstruction_error(result.reconstruction_error)
                    ),
                    tone,
                );
            }
            Err(err) => {
                warn!(kind = err.kind(), "Sensor analysis failed: {err}");
                self.ui.sensor.error = Some(view_model::SENSOR_FAILURE_MESSAGE.to_string());
                self.set_status(view_model::SENSOR_FAILURE_MESSAGE, StatusTone::Error);
            }
        }
    }
}
