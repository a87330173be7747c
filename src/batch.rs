//! Headless batch runs against the inference service.
//!
//! Used by the `factory-qc-batch` binary: classify a folder of images into a
//! CSV report, or replay a recorded sensor CSV through the anomaly endpoint.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::inference::{ImageUpload, InferenceBackend};
use crate::sensors::{SensorHistory, SensorInput, SensorReading};

/// Extensions picked up from an image folder.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const DEFAULT_IMAGE_REPORT: &str = "image_inference_results.csv";

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Image files directly inside `dir`, sorted by file name.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let entries = fs::read_dir(dir).map_err(|source| BatchError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// One row of the image report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReportRow {
    pub filename: String,
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageBatchSummary {
    pub classified: usize,
    pub defects: usize,
    pub failures: usize,
}

/// Classify `images` in order, printing one line each to `console` and
/// writing successful results to `report_path`.
///
/// A failed image is printed and counted; the run continues.
pub fn run_image_batch(
    backend: &dyn InferenceBackend,
    images: &[PathBuf],
    report_path: &Path,
    console: &mut dyn io::Write,
) -> Result<ImageBatchSummary, BatchError> {
    let csv_error = |source| BatchError::Csv {
        path: report_path.to_path_buf(),
        source,
    };
    let mut report = csv::Writer::from_path(report_path).map_err(csv_error)?;
    let mut summary = ImageBatchSummary::default();
    for path in images {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let result = ImageUpload::from_path(path).and_then(|upload| backend.predict_image(&upload));
        match result {
            Ok(prediction) => {
                summary.classified += 1;
                if !prediction.label.is_good() {
                    summary.defects += 1;
                }
                writeln!(
                    console,
                    "{name:<20} -> {:<10} ({:.2}% confident)",
                    prediction.label.as_str(),
                    prediction.confidence * 100.0
                )?;
                report
                    .serialize(ImageReportRow {
                        filename: name,
                        label: prediction.label.as_str().to_string(),
                        confidence: prediction.confidence,
                    })
                    .map_err(csv_error)?;
            }
            Err(err) => {
                summary.failures += 1;
                warn!(kind = err.kind(), path = %path.display(), "Image inference failed: {err}");
                writeln!(console, "{name:<20} -> failed: {err}")?;
            }
        }
    }
    report.flush()?;
    info!(
        classified = summary.classified,
        defects = summary.defects,
        failures = summary.failures,
        "Image batch finished"
    );
    Ok(summary)
}

/// One recorded sensor sample. `label` is the recorded ground truth, if any.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorRow {
    pub timestamp: String,
    pub vibration: f64,
    pub temp: f64,
    pub pressure: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl SensorRow {
    pub fn input(&self) -> SensorInput {
        SensorInput {
            vibration: self.vibration,
            temperature: self.temp,
            pressure: self.pressure,
        }
    }

    fn labelled_anomaly(&self) -> Option<bool> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(|label| label.eq_ignore_ascii_case("anomaly"))
    }
}

/// Read up to `limit` rows from a sensor CSV with a header line.
pub fn read_sensor_rows(path: &Path, limit: Option<usize>) -> Result<Vec<SensorRow>, BatchError> {
    let csv_error = |source| BatchError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<SensorRow>() {
        if limit.is_some_and(|limit| rows.len() >= limit) {
            break;
        }
        rows.push(record.map_err(csv_error)?);
    }
    Ok(rows)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorBatchSummary {
    pub analyzed: usize,
    pub anomalies: usize,
    pub failures: usize,
    /// Rows with a recorded label, and how many of those the service agreed with.
    pub labelled: usize,
    pub agreed: usize,
}

/// Replay `rows` through the anomaly endpoint, keeping a bounded history.
///
/// Anomalies are printed as they are found; a failed row is printed and
/// counted and the run continues.
pub fn run_sensor_batch(
    backend: &dyn InferenceBackend,
    rows: &[SensorRow],
    history: &mut SensorHistory,
    console: &mut dyn io::Write,
) -> Result<SensorBatchSummary, BatchError> {
    let mut summary = SensorBatchSummary::default();
    for row in rows {
        let input = row.input();
        match backend.predict_sensor(&input) {
            Ok(result) => {
                summary.analyzed += 1;
                if result.anomaly {
                    summary.anomalies += 1;
                    writeln!(
                        console,
                        "{} anomaly (error {:.4})",
                        row.timestamp, result.reconstruction_error
                    )?;
                }
                if let Some(expected) = row.labelled_anomaly() {
                    summary.labelled += 1;
                    if expected == result.anomaly {
                        summary.agreed += 1;
                    }
                }
                history.push(SensorReading::new(row.timestamp.clone(), &input, &result));
            }
            Err(err) => {
                summary.failures += 1;
                warn!(kind = err.kind(), timestamp = %row.timestamp, "Sensor inference failed: {err}");
                writeln!(console, "{} failed: {err}", row.timestamp)?;
            }
        }
    }
    info!(
        analyzed = summary.analyzed,
        anomalies = summary.anomalies,
        failures = summary.failures,
        "Sensor replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{AnomalyResult, InferenceError, PredictionResult, QualityLabel};
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Defective when the file name contains "bad"; fails for "broken".
    struct NameBackend;

    impl InferenceBackend for NameBackend {
        fn predict_image(&self, upload: &ImageUpload) -> Result<PredictionResult, InferenceError> {
            if upload.file_name.contains("broken") {
                return Err(InferenceError::Server {
                    status: 500,
                    body: "boom".into(),
                });
            }
            let label = if upload.file_name.contains("bad") {
                QualityLabel::Defective
            } else {
                QualityLabel::Good
            };
            Ok(PredictionResult {
                label,
                confidence: 0.9,
            })
        }

        fn predict_sensor(&self, _input: &SensorInput) -> Result<AnomalyResult, InferenceError> {
            Err(InferenceError::Unreachable("images only".into()))
        }
    }

    /// Anomaly when temperature exceeds 50; fails when vibration is negative.
    #[derive(Default)]
    struct ThresholdBackend {
        seen: Mutex<Vec<SensorInput>>,
    }

    impl InferenceBackend for ThresholdBackend {
        fn predict_image(&self, _upload: &ImageUpload) -> Result<PredictionResult, InferenceError> {
            Err(InferenceError::Unreachable("sensors only".into()))
        }

        fn predict_sensor(&self, input: &SensorInput) -> Result<AnomalyResult, InferenceError> {
            self.seen.lock().unwrap().push(*input);
            if input.vibration < 0.0 {
                return Err(InferenceError::MalformedResponse("bad".into()));
            }
            Ok(AnomalyResult {
                anomaly: input.temperature > 50.0,
                reconstruction_error: input.temperature / 1000.0,
            })
        }
    }

    #[test]
    fn collects_images_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "notes.txt", "c.jpeg", "d.gif"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        let names: Vec<String> = collect_images(dir.path())
            .unwrap()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.jpeg"]);
    }

    #[test]
    fn image_batch_writes_report_and_counts_defects() {
        let dir = tempdir().unwrap();
        let images: Vec<PathBuf> = ["good.png", "bad.png", "broken.png"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, b"pixels").unwrap();
                path
            })
            .collect();
        let report = dir.path().join("report.csv");
        let mut console = Vec::new();

        let summary = run_image_batch(&NameBackend, &images, &report, &mut console).unwrap();

        assert_eq!(
            summary,
            ImageBatchSummary {
                classified: 2,
                defects: 1,
                failures: 1,
            }
        );
        let csv = fs::read_to_string(&report).unwrap();
        assert_eq!(
            csv,
            "filename,label,confidence\ngood.png,Good,0.9\nbad.png,Defective,0.9\n"
        );
        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("(90.00% confident)"));
        assert!(console.contains("broken.png"));
    }

    #[test]
    fn sensor_rows_parse_with_optional_label_and_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sensors.csv");
        fs::write(
            &path,
            "timestamp,vibration,temp,pressure,label\n\
             2025-06-01 00:00:00,1.0,37.0,2.4,normal\n\
             2025-06-01 00:01:00,3.1,61.5,8.2,anomaly\n\
             2025-06-01 00:02:00,0.9,36.8,2.3,normal\n",
        )
        .unwrap();

        let rows = read_sensor_rows(&path, Some(2)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].temp, 61.5);
        assert_eq!(rows[1].label.as_deref(), Some("anomaly"));
        assert_eq!(rows[1].input().temperature, 61.5);
    }

    #[test]
    fn sensor_rows_without_label_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sensors.csv");
        fs::write(&path, "timestamp,vibration,temp,pressure\nt0,0.5,25.0,1.2\n").unwrap();
        let rows = read_sensor_rows(&path, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].label.is_none());
    }

    #[test]
    fn sensor_replay_keeps_bounded_history_and_continues_after_failure() {
        let mut rows: Vec<SensorRow> = (0..12)
            .map(|idx| SensorRow {
                timestamp: format!("t{idx}"),
                vibration: 1.0,
                temp: if idx == 5 { 60.0 } else { 37.0 },
                pressure: 2.4,
                label: Some(if idx == 5 { "anomaly" } else { "normal" }.to_string()),
            })
            .collect();
        rows[3].vibration = -1.0;
        let backend = ThresholdBackend::default();
        let mut history = SensorHistory::with_capacity(10);
        let mut console = Vec::new();

        let summary = run_sensor_batch(&backend, &rows, &mut history, &mut console).unwrap();

        assert_eq!(summary.analyzed, 11);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.anomalies, 1);
        assert_eq!(summary.labelled, 11);
        assert_eq!(summary.agreed, 11);
        assert_eq!(history.len(), 10);
        assert_eq!(history.latest().unwrap().timestamp, "t11");
        assert_eq!(backend.seen.lock().unwrap().len(), 12);
        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("t5 anomaly (error 0.0600)"));
        assert!(console.contains("t3 failed"));
    }
}
