//! Display strings derived from panel state.

use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use crate::inference::{AnomalyResult, PredictionResult};
use crate::sensors::HistorySummary;

const CLOCK_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[weekday], [month repr:long] [day padding:none], [year]");

pub const IMAGE_FAILURE_MESSAGE: &str = "Failed to analyze image. Please try again.";
pub const SENSOR_FAILURE_MESSAGE: &str = "Failed to analyze sensor data. Please try again.";

/// Confidence fraction as a percentage with one decimal, e.g. `95.0%`.
pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Reconstruction error with six decimals, e.g. `0.004321`.
pub fn reconstruction_error(error: f64) -> String {
    format!("{error:.6}")
}

/// Headline for an image verdict.
pub fn quality_headline(prediction: &PredictionResult) -> &'static str {
    if prediction.label.is_good() {
        "Good Quality"
    } else {
        "Defective Detected"
    }
}

/// Headline for a sensor verdict.
pub fn anomaly_headline(result: &AnomalyResult) -> &'static str {
    if result.anomaly {
        "Anomaly Detected"
    } else {
        "Normal Operation"
    }
}

pub fn vibration_reading(value: f64) -> String {
    format!("{value:.3}")
}

pub fn temperature_reading(value: f64) -> String {
    format!("{value:.1}°C")
}

pub fn pressure_reading(value: f64) -> String {
    format!("{value:.2} bar")
}

/// `HH:MM:SS` label used by the clock and history timestamps.
pub fn clock_time(now: OffsetDateTime) -> String {
    now.format(CLOCK_FORMAT)
        .unwrap_or_else(|_| format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second()))
}

pub fn clock_date(now: OffsetDateTime) -> String {
    now.format(DATE_FORMAT).unwrap_or_else(|_| now.date().to_string())
}

/// One-line description of the sensor history.
pub fn history_summary(summary: &HistorySummary) -> String {
    match (summary.mean_error, summary.max_error) {
        (Some(mean), Some(max)) => format!(
            "{} readings, {} anomalies, mean error {}, max error {}",
            summary.count,
            summary.anomalies,
            reconstruction_error(mean),
            reconstruction_error(max)
        ),
        _ => "No readings yet".to_string(),
    }
}
